pub mod access_locks;
pub mod documentation;
pub mod floor_plan;
pub mod furniture;
pub mod leads;
pub mod owners;
pub mod partners;
pub mod system;
pub mod upload;

use serde::Deserialize;

use crate::error::ApiError;
use crate::filter::Page;

/// `?skip=&limit=` on list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> Result<Page, ApiError> {
        Ok(Page::new(self.skip, self.limit)?)
    }
}
