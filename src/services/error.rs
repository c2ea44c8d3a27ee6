use thiserror::Error;

use crate::auth::PasswordError;
use crate::database::models::access_locks::UnknownSection;
use crate::database::StoreError;
use crate::filter::FilterError;
use crate::storage::StorageError;

/// Failures of the owner-document protocol: section merge, list items, media recording
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    UnknownSection(#[from] UnknownSection),

    /// Upload target that is not a section with a video slot
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("{0}")]
    DocumentNotFound(&'static str),

    #[error("{0}")]
    ItemNotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}
