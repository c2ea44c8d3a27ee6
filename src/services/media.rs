//! Records the reference to an already-stored file on its owning document

use serde::Serialize;

use crate::database::models::{
    AccessAndLocks, AccessSection, DocumentationFile, DocumentationImage, FloorPlan, ListItem,
    PropertyDocumentation, VideoData,
};
use crate::storage::StoredFile;

use super::error::DocumentError;
use super::list_items::find_by_id_mut;

pub const ITEM_NOT_FOUND: &str = "Security system item not found";

/// Slot or list a stored file is attached to
pub enum MediaTarget<'a> {
    /// Single video slot of a section; overwritten
    SectionVideo { doc: &'a mut AccessAndLocks, section: AccessSection },
    /// `image_url` of the floor plan; overwritten
    FloorPlanImage { doc: &'a mut FloorPlan },
    /// `images` list of a security-system item; appended
    ItemImage { doc: &'a mut PropertyDocumentation, item_id: &'a str, caption: Option<String> },
    /// `documents` list of a security-system item; appended
    ItemDocument { doc: &'a mut PropertyDocumentation, item_id: &'a str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaRecord {
    Video(VideoData),
    FloorPlanImage { image_url: String },
    Image(DocumentationImage),
    Document(DocumentationFile),
}

/// Attach `file` to `target` and return the recorded reference.
///
/// The caller persists the document afterwards. Files previously referenced
/// by an overwritten slot are left on disk.
pub fn record_media(target: MediaTarget<'_>, file: &StoredFile) -> Result<MediaRecord, DocumentError> {
    match target {
        MediaTarget::SectionVideo { doc, section } => {
            let slot = doc
                .video_slot_mut(section)
                .ok_or_else(|| DocumentError::InvalidCategory(section.field_name().to_string()))?;
            let video = VideoData::uploaded(file.url.clone());
            *slot = Some(video.clone());
            Ok(MediaRecord::Video(video))
        }
        MediaTarget::FloorPlanImage { doc } => {
            doc.image_url = Some(file.url.clone());
            Ok(MediaRecord::FloorPlanImage { image_url: file.url.clone() })
        }
        MediaTarget::ItemImage { doc, item_id, caption } => {
            let item = find_by_id_mut(&mut doc.security_systems, item_id)
                .ok_or(DocumentError::ItemNotFound(ITEM_NOT_FOUND))?;
            let image = DocumentationImage::new(file.url.clone(), caption);
            item.images.push(image.clone());
            item.touch();
            Ok(MediaRecord::Image(image))
        }
        MediaTarget::ItemDocument { doc, item_id } => {
            let item = find_by_id_mut(&mut doc.security_systems, item_id)
                .ok_or(DocumentError::ItemNotFound(ITEM_NOT_FOUND))?;
            let document = DocumentationFile::new(
                file.url.clone(),
                file.original_name.clone(),
                file.extension.clone(),
                Some(file.size),
            );
            item.documents.push(document.clone());
            item.touch();
            Ok(MediaRecord::Document(document))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{OwnerDocument, SecuritySystemItem, SecuritySystemItemCreate};

    fn stored(url: &str) -> StoredFile {
        StoredFile {
            url: url.to_string(),
            stored_name: url.trim_start_matches("/uploads/").to_string(),
            original_name: "manual.pdf".to_string(),
            extension: "pdf".to_string(),
            size: 2048,
        }
    }

    fn documentation_with_item() -> (PropertyDocumentation, String) {
        let mut doc = PropertyDocumentation::new("o1");
        let item = SecuritySystemItem::from(SecuritySystemItemCreate {
            name: "Brannalarm".into(),
            location: "Stue".into(),
            system_type: "Røykvarsler".into(),
            last_checked: None,
            installed_date: None,
            installer: None,
            description: None,
            notes: None,
            additional_info: None,
        });
        let id = item.id.clone();
        doc.security_systems.push(item);
        (doc, id)
    }

    #[test]
    fn section_video_is_overwritten() {
        let mut doc = AccessAndLocks::new("o1");
        record_media(MediaTarget::SectionVideo { doc: &mut doc, section: AccessSection::Parking }, &stored("/uploads/a.mp4")).unwrap();
        record_media(MediaTarget::SectionVideo { doc: &mut doc, section: AccessSection::Parking }, &stored("/uploads/b.mp4")).unwrap();

        let video = doc.parking_info.video.unwrap();
        assert_eq!(video.url.as_deref(), Some("/uploads/b.mp4"));
        assert!(video.uploaded_at.is_some());
    }

    #[test]
    fn section_without_slot_fails_closed() {
        let mut doc = AccessAndLocks::new("o1");
        let err = record_media(
            MediaTarget::SectionVideo { doc: &mut doc, section: AccessSection::BackupAccess },
            &stored("/uploads/a.mp4"),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid category: backup_access");
    }

    #[test]
    fn item_images_append() {
        let (mut doc, id) = documentation_with_item();
        for n in 0..3 {
            record_media(
                MediaTarget::ItemImage { doc: &mut doc, item_id: &id, caption: Some(format!("bilde {n}")) },
                &stored("/uploads/x.jpg"),
            )
            .unwrap();
        }
        assert_eq!(doc.security_systems[0].images.len(), 3);
        assert_eq!(doc.security_systems[0].images[2].caption.as_deref(), Some("bilde 2"));
    }

    #[test]
    fn item_document_records_file_metadata() {
        let (mut doc, id) = documentation_with_item();
        let record = record_media(MediaTarget::ItemDocument { doc: &mut doc, item_id: &id }, &stored("/uploads/m.pdf")).unwrap();

        let MediaRecord::Document(file) = record else { panic!("expected document") };
        assert_eq!(file.filename, "manual.pdf");
        assert_eq!(file.file_type, "pdf");
        assert_eq!(file.size, Some(2048));
    }

    #[test]
    fn missing_item_is_not_found() {
        let (mut doc, _) = documentation_with_item();
        let err = record_media(MediaTarget::ItemDocument { doc: &mut doc, item_id: "nope" }, &stored("/uploads/m.pdf")).unwrap_err();
        assert!(matches!(err, DocumentError::ItemNotFound(ITEM_NOT_FOUND)));
    }
}
