use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::database::models::{AccessAndLocks, AccessSection, OwnerDocument, SectionPatch};
use crate::database::store::{encode, DocumentStore};
use crate::filter::DocFilter;
use crate::storage::{FileStorage, MediaKind, Upload};

use super::error::{DocumentError, ServiceError};
use super::media::{record_media, MediaRecord, MediaTarget};
use super::owner_documents;

/// Merge a sparse section update into the owner's document.
///
/// With no existing document a default one is synthesized. Returns the full
/// document to persist and the merged section to hand back to the client.
pub fn merge_section(
    existing: Option<AccessAndLocks>,
    owner_id: &str,
    patch: SectionPatch,
) -> Result<(AccessAndLocks, Value), DocumentError> {
    let mut doc = existing.unwrap_or_else(|| AccessAndLocks::new(owner_id));
    let section = patch.section();
    doc.apply(patch);
    doc.touch();
    let merged = doc.section_json(section).map_err(crate::database::StoreError::from)?;
    Ok((doc, merged))
}

pub struct AccessLocksService {
    store: Arc<dyn DocumentStore>,
    files: Arc<dyn FileStorage>,
}

impl AccessLocksService {
    pub fn new(store: Arc<dyn DocumentStore>, files: Arc<dyn FileStorage>) -> Self {
        Self { store, files }
    }

    pub async fn get(&self, owner_id: &str) -> Result<AccessAndLocks, ServiceError> {
        owner_documents::require_owner(self.store.as_ref(), owner_id).await?;
        Ok(owner_documents::fetch_or_create(self.store.as_ref(), owner_id).await?)
    }

    /// PUT a section. `section` is the raw route segment.
    pub async fn update_section(&self, owner_id: &str, section: &str, body: Value) -> Result<Value, ServiceError> {
        let section: AccessSection = section.parse().map_err(|e| {
            warn!("Rejected access-locks update: {}", e);
            DocumentError::UnknownSection(e)
        })?;
        let patch = SectionPatch::parse(section, body).map_err(|e| ServiceError::Validation(e.to_string()))?;

        let existing = owner_documents::load::<AccessAndLocks>(self.store.as_ref(), owner_id).await?;
        let (doc, merged) = merge_section(existing, owner_id, patch)?;
        self.store
            .upsert(AccessAndLocks::COLLECTION, &DocFilter::by_owner(owner_id), encode(&doc)?)
            .await?;
        Ok(merged)
    }

    /// Store a video and put it in the section's video slot
    pub async fn upload_video(&self, owner_id: &str, category: &str, upload: &Upload) -> Result<MediaRecord, ServiceError> {
        let section = category
            .parse::<AccessSection>()
            .ok()
            .filter(AccessSection::has_video_slot)
            .ok_or_else(|| DocumentError::InvalidCategory(category.to_string()))?;

        let file = self.files.store(MediaKind::Video, upload, "").await?;

        let mut doc = owner_documents::load_or_new::<AccessAndLocks>(self.store.as_ref(), owner_id).await?;
        let record = record_media(MediaTarget::SectionVideo { doc: &mut doc, section }, &file)?;
        owner_documents::save(self.store.as_ref(), &mut doc).await?;
        Ok(record)
    }
}
