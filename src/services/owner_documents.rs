//! Fetch-or-create and upsert for documents held once per owner

use crate::database::models::OwnerDocument;
use crate::database::store::{decode, encode, Collection, DocumentStore};
use crate::filter::DocFilter;

use super::error::DocumentError;

pub const OWNER_NOT_FOUND: &str = "Owner not found";

pub async fn load<D: OwnerDocument>(store: &dyn DocumentStore, owner_id: &str) -> Result<Option<D>, DocumentError> {
    match store.find_one(D::COLLECTION, &DocFilter::by_owner(owner_id)).await? {
        Some(doc) => Ok(Some(decode(doc)?)),
        None => Ok(None),
    }
}

/// Load the owner's document, or fail with `missing` as the not-found message
pub async fn load_existing<D: OwnerDocument>(
    store: &dyn DocumentStore,
    owner_id: &str,
    missing: &'static str,
) -> Result<D, DocumentError> {
    load(store, owner_id).await?.ok_or(DocumentError::DocumentNotFound(missing))
}

/// Load the owner's document or synthesize a default one. Nothing is written.
pub async fn load_or_new<D: OwnerDocument>(store: &dyn DocumentStore, owner_id: &str) -> Result<D, DocumentError> {
    Ok(load(store, owner_id).await?.unwrap_or_else(|| D::new(owner_id)))
}

/// Load the owner's document, creating and persisting the default on first access
pub async fn fetch_or_create<D: OwnerDocument>(store: &dyn DocumentStore, owner_id: &str) -> Result<D, DocumentError> {
    if let Some(doc) = load(store, owner_id).await? {
        return Ok(doc);
    }
    let doc = D::new(owner_id);
    store
        .upsert(D::COLLECTION, &DocFilter::by_owner(owner_id), encode(&doc)?)
        .await?;
    tracing::debug!("Created {} document for owner {}", D::COLLECTION, owner_id);
    Ok(doc)
}

/// Stamp `updated_at` and replace the owner's document wholesale
pub async fn save<D: OwnerDocument>(store: &dyn DocumentStore, doc: &mut D) -> Result<(), DocumentError> {
    doc.touch();
    store
        .upsert(D::COLLECTION, &DocFilter::by_owner(doc.owner_id()), encode(&*doc)?)
        .await?;
    Ok(())
}

pub async fn require_owner(store: &dyn DocumentStore, owner_id: &str) -> Result<(), DocumentError> {
    match store.find_one(Collection::Owners, &DocFilter::by_id(owner_id)).await? {
        Some(_) => Ok(()),
        None => Err(DocumentError::DocumentNotFound(OWNER_NOT_FOUND)),
    }
}
