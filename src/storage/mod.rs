//! Uploaded file persistence.
//!
//! Files are written under the configured upload directory as
//! `<prefix><uuid>.<ext>` and served back from `<url_prefix>/<name>`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::UploadConfig;

const DOCUMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("File storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Allow-list class for an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    Document,
}

impl MediaKind {
    pub fn accepts(&self, content_type: &str) -> bool {
        let content_type = content_type.trim().to_ascii_lowercase();
        match self {
            MediaKind::Video => content_type.starts_with("video/"),
            MediaKind::Image => content_type.starts_with("image/"),
            MediaKind::Document => DOCUMENT_TYPES.contains(&content_type.as_str()),
        }
    }

    pub fn rejection(&self) -> &'static str {
        match self {
            MediaKind::Video => "File must be a video",
            MediaKind::Image => "File must be an image",
            MediaKind::Document => "File must be PDF or Word document",
        }
    }

    pub fn check(&self, content_type: Option<&str>) -> Result<(), StorageError> {
        match content_type {
            Some(ct) if self.accepts(ct) => Ok(()),
            _ => Err(StorageError::UnsupportedMediaType(self.rejection().to_string())),
        }
    }
}

/// A file received in a multipart request
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl Upload {
    /// Text after the last `.` of the client file name, restricted to `[A-Za-z0-9]`
    pub fn extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext))
            .map(|ext| ext.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| "bin".to_string())
    }
}

/// Where an accepted upload ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub url: String,
    pub stored_name: String,
    /// Client-supplied file name, or the stored name when none was sent
    pub original_name: String,
    pub extension: String,
    pub size: u64,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Check the upload against `kind`'s allow-list, then persist it
    async fn store(&self, kind: MediaKind, upload: &Upload, name_prefix: &str) -> Result<StoredFile, StorageError>;
}

pub struct LocalFileStorage {
    dir: PathBuf,
    url_prefix: String,
}

impl LocalFileStorage {
    /// `url_prefix` is expected in the form [`UploadConfig::normalize_url_prefix`] produces
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self { dir: dir.into(), url_prefix: url_prefix.into() }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.dir.clone(), config.url_prefix.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if missing
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, kind: MediaKind, upload: &Upload, name_prefix: &str) -> Result<StoredFile, StorageError> {
        if let Err(e) = kind.check(upload.content_type.as_deref()) {
            warn!("Rejected upload {:?} ({:?}): {}", upload.file_name, upload.content_type, e);
            return Err(e);
        }

        let extension = upload.extension();
        let stored_name = format!("{}{}.{}", name_prefix, Uuid::new_v4(), extension);

        self.ensure_dir().await?;
        tokio::fs::write(self.dir.join(&stored_name), &upload.data).await?;
        debug!("Stored upload {} ({} bytes)", stored_name, upload.data.len());

        Ok(StoredFile {
            url: format!("{}/{}", self.url_prefix, stored_name),
            original_name: upload.file_name.clone().unwrap_or_else(|| stored_name.clone()),
            stored_name,
            extension,
            size: upload.data.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: &str) -> Upload {
        Upload {
            file_name: Some(name.to_string()),
            content_type: Some(content_type.to_string()),
            data: b"bytes".to_vec(),
        }
    }

    #[test]
    fn allow_lists() {
        assert!(MediaKind::Video.accepts("video/mp4"));
        assert!(!MediaKind::Video.accepts("image/png"));
        assert!(MediaKind::Image.accepts("image/jpeg"));
        assert!(MediaKind::Document.accepts("application/pdf"));
        assert!(!MediaKind::Document.accepts("text/plain"));
        assert!(MediaKind::Image.check(None).is_err());
    }

    #[test]
    fn extension_is_sanitized() {
        assert_eq!(upload("plan.PNG", "image/png").extension(), "PNG");
        assert_eq!(upload("../../etc/passwd", "image/png").extension(), "etcpasswd");
        assert_eq!(upload("noext", "image/png").extension(), "bin");
    }

    #[tokio::test]
    async fn stores_under_prefix_and_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "/uploads");

        let stored = storage.store(MediaKind::Image, &upload("plan.png", "image/png"), "floor_plan_").await.unwrap();

        assert!(stored.stored_name.starts_with("floor_plan_"));
        assert!(stored.url.starts_with("/uploads/floor_plan_"));
        assert_eq!(stored.size, 5);
        assert_eq!(stored.original_name, "plan.png");
        assert_eq!(std::fs::read(dir.path().join(&stored.stored_name)).unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn rejects_wrong_type_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("up"), "/uploads");

        let err = storage.store(MediaKind::Video, &upload("a.png", "image/png"), "").await.unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedMediaType(msg) if msg == "File must be a video"));
        assert!(!dir.path().join("up").exists());
    }
}
