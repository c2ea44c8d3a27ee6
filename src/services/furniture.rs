use std::sync::Arc;

use crate::database::models::{
    FurnitureEquipment, FurnitureEquipmentPatch, FurnitureItem, FurnitureItemCreate, FurnitureItemPatch, Patch,
};
use crate::database::store::DocumentStore;

use super::error::{DocumentError, ServiceError};
use super::list_items;
use super::owner_documents;

pub const FURNITURE_NOT_FOUND: &str = "Furniture equipment data not found";
pub const FURNITURE_ITEM_NOT_FOUND: &str = "Furniture item not found";

pub struct FurnitureService {
    store: Arc<dyn DocumentStore>,
}

impl FurnitureService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the checklist, seeding it with the default items on first access
    pub async fn get(&self, owner_id: &str) -> Result<FurnitureEquipment, ServiceError> {
        owner_documents::require_owner(self.store.as_ref(), owner_id).await?;
        Ok(owner_documents::fetch_or_create(self.store.as_ref(), owner_id).await?)
    }

    pub async fn update(&self, owner_id: &str, patch: FurnitureEquipmentPatch) -> Result<FurnitureEquipment, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        patch.apply_to(&mut doc);
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(doc)
    }

    pub async fn add_item(&self, owner_id: &str, create: FurnitureItemCreate) -> Result<FurnitureItem, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let item = list_items::append(&mut doc.items, FurnitureItem::from(create));
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(item)
    }

    pub async fn update_item(&self, owner_id: &str, item_id: &str, patch: FurnitureItemPatch) -> Result<FurnitureItem, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let item = list_items::update_by_id(&mut doc.items, item_id, patch)
            .ok_or(DocumentError::ItemNotFound(FURNITURE_ITEM_NOT_FOUND))?;
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(item)
    }

    pub async fn delete_item(&self, owner_id: &str, item_id: &str) -> Result<usize, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let removed = list_items::remove_by_id(&mut doc.items, item_id);
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(removed)
    }

    async fn existing(&self, owner_id: &str) -> Result<FurnitureEquipment, DocumentError> {
        owner_documents::load_existing(self.store.as_ref(), owner_id, FURNITURE_NOT_FOUND).await
    }
}
