use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::filter::{DocFilter, FilterError, Page};

/// Named document collections. Each holds JSON objects keyed by `id` or `owner_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    AccessAndLocks,
    FloorPlans,
    FurnitureEquipment,
    PropertyDocumentation,
    Leads,
    Owners,
    Partners,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::AccessAndLocks,
        Collection::FloorPlans,
        Collection::FurnitureEquipment,
        Collection::PropertyDocumentation,
        Collection::Leads,
        Collection::Owners,
        Collection::Partners,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::AccessAndLocks => "access_and_locks",
            Collection::FloorPlans => "floor_plans",
            Collection::FurnitureEquipment => "furniture_equipment",
            Collection::PropertyDocumentation => "property_documentation",
            Collection::Leads => "leads",
            Collection::Owners => "owners",
            Collection::Partners => "partners",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Document is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence seam for every resource.
///
/// All operations address documents through a [`DocFilter`] and act on the first
/// match in insertion order. No operation spans more than one document, so a
/// read-modify-write in a service is not atomic across concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend name for health output
    fn backend(&self) -> &'static str;

    async fn find_one(&self, collection: Collection, filter: &DocFilter) -> Result<Option<Value>, StoreError>;

    async fn find_many(&self, collection: Collection, filter: &DocFilter, page: Page) -> Result<Vec<Value>, StoreError>;

    async fn insert(&self, collection: Collection, doc: Value) -> Result<(), StoreError>;

    /// Replace the first match wholesale, or insert `doc` when nothing matches.
    ///
    /// Atomic per call: concurrent upserts with the same filter never both
    /// insert, so an owner-scoped filter keeps at most one document per owner.
    async fn upsert(&self, collection: Collection, filter: &DocFilter, doc: Value) -> Result<(), StoreError>;

    /// Shallow-merge `fields` into the first match and return the updated document
    async fn update_fields(
        &self,
        collection: Collection,
        filter: &DocFilter,
        fields: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError>;

    /// Delete the first match. Returns whether anything was removed.
    async fn delete_one(&self, collection: Collection, filter: &DocFilter) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Decode a stored document into its typed form
pub fn decode<T: DeserializeOwned>(doc: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(doc)?)
}

/// Encode a typed document for storage
pub fn encode<T: Serialize>(doc: &T) -> Result<Value, StoreError> {
    Ok(serde_json::to_value(doc)?)
}
