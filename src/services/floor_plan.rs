use std::sync::Arc;

use crate::database::models::{Annotation, AnnotationCreate, AnnotationPatch, FloorPlan, FloorPlanPatch, Patch};
use crate::database::store::DocumentStore;
use crate::storage::{FileStorage, MediaKind, Upload};

use super::error::{DocumentError, ServiceError};
use super::list_items;
use super::media::{record_media, MediaRecord, MediaTarget};
use super::owner_documents;

pub const FLOOR_PLAN_NOT_FOUND: &str = "Floor plan not found";
pub const ANNOTATION_NOT_FOUND: &str = "Annotation not found";

pub struct FloorPlanService {
    store: Arc<dyn DocumentStore>,
    files: Arc<dyn FileStorage>,
}

impl FloorPlanService {
    pub fn new(store: Arc<dyn DocumentStore>, files: Arc<dyn FileStorage>) -> Self {
        Self { store, files }
    }

    pub async fn get(&self, owner_id: &str) -> Result<FloorPlan, ServiceError> {
        owner_documents::require_owner(self.store.as_ref(), owner_id).await?;
        Ok(owner_documents::fetch_or_create(self.store.as_ref(), owner_id).await?)
    }

    /// Patch `comment` and/or replace `annotations`, creating the document if needed
    pub async fn update(&self, owner_id: &str, patch: FloorPlanPatch) -> Result<FloorPlan, ServiceError> {
        let mut doc = owner_documents::load_or_new::<FloorPlan>(self.store.as_ref(), owner_id).await?;
        patch.apply_to(&mut doc);
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(doc)
    }

    pub async fn upload_image(&self, owner_id: &str, upload: &Upload) -> Result<MediaRecord, ServiceError> {
        let file = self.files.store(MediaKind::Image, upload, "floor_plan_").await?;

        let mut doc = owner_documents::load_or_new::<FloorPlan>(self.store.as_ref(), owner_id).await?;
        let record = record_media(MediaTarget::FloorPlanImage { doc: &mut doc }, &file)?;
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(record)
    }

    pub async fn add_annotation(&self, owner_id: &str, create: AnnotationCreate) -> Result<Annotation, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let annotation = list_items::append(&mut doc.annotations, Annotation::from(create));
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(annotation)
    }

    pub async fn update_annotation(
        &self,
        owner_id: &str,
        annotation_id: &str,
        patch: AnnotationPatch,
    ) -> Result<Annotation, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let annotation = list_items::update_by_id(&mut doc.annotations, annotation_id, patch)
            .ok_or(DocumentError::ItemNotFound(ANNOTATION_NOT_FOUND))?;
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(annotation)
    }

    /// Remove every annotation with `annotation_id`; a missing id is not an error
    pub async fn delete_annotation(&self, owner_id: &str, annotation_id: &str) -> Result<usize, ServiceError> {
        let mut doc = self.existing(owner_id).await?;
        let removed = list_items::remove_by_id(&mut doc.annotations, annotation_id);
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(removed)
    }

    async fn existing(&self, owner_id: &str) -> Result<FloorPlan, DocumentError> {
        owner_documents::load_existing(self.store.as_ref(), owner_id, FLOOR_PLAN_NOT_FOUND).await
    }
}
