use std::sync::Arc;

use serde_json::{Map, Value};

use crate::database::models::{
    ListItem, OwnerDocument, PropertyDocumentation, SecuritySystemItem, SecuritySystemItemCreate,
    SecuritySystemItemPatch,
};
use crate::database::store::{encode, DocumentStore};
use crate::filter::DocFilter;
use crate::storage::{FileStorage, MediaKind, Upload};
use crate::types::now;

use super::error::{DocumentError, ServiceError};
use super::list_items;
use super::media::{record_media, MediaRecord, MediaTarget, ITEM_NOT_FOUND};
use super::owner_documents;

pub const DOCUMENTATION_NOT_FOUND: &str = "Documentation not found";

pub struct DocumentationService {
    store: Arc<dyn DocumentStore>,
    files: Arc<dyn FileStorage>,
}

impl DocumentationService {
    pub fn new(store: Arc<dyn DocumentStore>, files: Arc<dyn FileStorage>) -> Self {
        Self { store, files }
    }

    pub async fn get(&self, owner_id: &str) -> Result<PropertyDocumentation, ServiceError> {
        owner_documents::require_owner(self.store.as_ref(), owner_id).await?;
        Ok(owner_documents::fetch_or_create(self.store.as_ref(), owner_id).await?)
    }

    /// Security-system items, empty when the owner has no documentation yet
    pub async fn list_items(&self, owner_id: &str) -> Result<Vec<SecuritySystemItem>, ServiceError> {
        Ok(owner_documents::load::<PropertyDocumentation>(self.store.as_ref(), owner_id)
            .await?
            .map(|doc| doc.security_systems)
            .unwrap_or_default())
    }

    pub async fn get_item(&self, owner_id: &str, item_id: &str) -> Result<SecuritySystemItem, ServiceError> {
        let doc = self.existing(owner_id).await?;
        list_items::find_by_id(&doc.security_systems, item_id)
            .cloned()
            .ok_or_else(|| DocumentError::ItemNotFound(ITEM_NOT_FOUND).into())
    }

    /// Append an item, creating the documentation document if the owner has none
    pub async fn create_item(&self, owner_id: &str, create: SecuritySystemItemCreate) -> Result<SecuritySystemItem, ServiceError> {
        let mut doc = owner_documents::load_or_new::<PropertyDocumentation>(self.store.as_ref(), owner_id).await?;
        let item = list_items::append(&mut doc.security_systems, SecuritySystemItem::from(create));
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(item)
    }

    pub async fn update_item(
        &self,
        owner_id: &str,
        item_id: &str,
        patch: SecuritySystemItemPatch,
    ) -> Result<SecuritySystemItem, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let item = list_items::update_by_id(&mut doc.security_systems, item_id, patch)
            .ok_or(DocumentError::ItemNotFound(ITEM_NOT_FOUND))?;
        self.write_items(&doc).await?;
        Ok(item)
    }

    pub async fn delete_item(&self, owner_id: &str, item_id: &str) -> Result<usize, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let removed = list_items::remove_by_id(&mut doc.security_systems, item_id);
        self.write_items(&doc).await?;
        Ok(removed)
    }

    pub async fn upload_image(
        &self,
        owner_id: &str,
        item_id: &str,
        upload: &Upload,
        caption: Option<String>,
    ) -> Result<MediaRecord, ServiceError> {
        let file = self.files.store(MediaKind::Image, upload, "").await?;

        let mut doc = self.existing(owner_id).await?;
        let record = record_media(MediaTarget::ItemImage { doc: &mut doc, item_id, caption }, &file)?;
        self.write_items(&doc).await?;
        Ok(record)
    }

    pub async fn upload_document(&self, owner_id: &str, item_id: &str, upload: &Upload) -> Result<MediaRecord, ServiceError> {
        let file = self.files.store(MediaKind::Document, upload, "").await?;

        let mut doc = self.existing(owner_id).await?;
        let record = record_media(MediaTarget::ItemDocument { doc: &mut doc, item_id }, &file)?;
        self.write_items(&doc).await?;
        Ok(record)
    }

    pub async fn delete_image(&self, owner_id: &str, item_id: &str, image_id: &str) -> Result<usize, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let item = list_items::find_by_id_mut(&mut doc.security_systems, item_id)
            .ok_or(DocumentError::ItemNotFound(ITEM_NOT_FOUND))?;
        let removed = list_items::remove_by_id(&mut item.images, image_id);
        item.touch();
        self.write_items(&doc).await?;
        Ok(removed)
    }

    async fn existing(&self, owner_id: &str) -> Result<PropertyDocumentation, DocumentError> {
        owner_documents::load_existing(self.store.as_ref(), owner_id, DOCUMENTATION_NOT_FOUND).await
    }

    /// Write back only the item list and `updated_at` of an existing document
    async fn write_items(&self, doc: &PropertyDocumentation) -> Result<(), ServiceError> {
        let mut fields = Map::new();
        fields.insert("security_systems".to_string(), encode(&doc.security_systems)?);
        fields.insert("updated_at".to_string(), encode(&now())?);

        let updated: Option<Value> = self
            .store
            .update_fields(PropertyDocumentation::COLLECTION, &DocFilter::by_owner(&doc.owner_id), fields)
            .await?;
        match updated {
            Some(_) => Ok(()),
            None => Err(DocumentError::DocumentNotFound(DOCUMENTATION_NOT_FOUND).into()),
        }
    }
}
