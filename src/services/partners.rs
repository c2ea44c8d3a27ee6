use std::sync::Arc;

use serde_json::Value;

use crate::database::models::{Partner, PartnerCreate, PartnerPatch};
use crate::database::store::{decode, encode, Collection, DocumentStore};
use crate::filter::{DocFilter, Page};
use crate::types::now;

use super::error::ServiceError;

pub const PARTNER_NOT_FOUND: &str = "Partner not found";
const PARTNER_LIST_LIMIT: usize = 1000;

pub struct PartnerService {
    store: Arc<dyn DocumentStore>,
}

impl PartnerService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<Partner>, ServiceError> {
        let page = Page { skip: 0, limit: PARTNER_LIST_LIMIT };
        let docs = self.store.find_many(Collection::Partners, &DocFilter::by_owner(owner_id), page).await?;
        Ok(docs.into_iter().map(decode::<Partner>).collect::<Result<_, _>>()?)
    }

    pub async fn create(&self, owner_id: &str, create: PartnerCreate) -> Result<Partner, ServiceError> {
        let partner = Partner::new(owner_id, create);
        self.store.insert(Collection::Partners, encode(&partner)?).await?;
        Ok(partner)
    }

    /// Apply the non-null fields of `patch` and stamp `updated_at`
    pub async fn update(&self, owner_id: &str, partner_id: &str, patch: PartnerPatch) -> Result<Partner, ServiceError> {
        let mut fields = match encode(&patch)? {
            Value::Object(fields) => fields,
            _ => serde_json::Map::new(),
        };
        fields.insert("updated_at".to_string(), encode(&now())?);

        match self.store.update_fields(Collection::Partners, &Self::filter(owner_id, partner_id), fields).await? {
            Some(doc) => Ok(decode(doc)?),
            None => Err(ServiceError::NotFound(PARTNER_NOT_FOUND.to_string())),
        }
    }

    pub async fn delete(&self, owner_id: &str, partner_id: &str) -> Result<(), ServiceError> {
        if self.store.delete_one(Collection::Partners, &Self::filter(owner_id, partner_id)).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound(PARTNER_NOT_FOUND.to_string()))
        }
    }

    fn filter(owner_id: &str, partner_id: &str) -> DocFilter {
        DocFilter::by_id(partner_id).eq("owner_id", owner_id)
    }
}
