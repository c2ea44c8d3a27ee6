use serde::{Deserialize, Serialize};

use crate::types::{new_id, now, Timestamp};

/// Single video reference held in an access-and-locks section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoData {
    pub url: Option<String>,
    pub duration: Option<String>,
    pub uploaded_at: Option<Timestamp>,
}

impl VideoData {
    pub fn uploaded(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            duration: None,
            uploaded_at: Some(now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationImage {
    pub id: String,
    pub url: String,
    pub caption: Option<String>,
    pub uploaded_at: Timestamp,
}

impl DocumentationImage {
    pub fn new(url: impl Into<String>, caption: Option<String>) -> Self {
        Self {
            id: new_id(),
            url: url.into(),
            caption,
            uploaded_at: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationFile {
    pub id: String,
    pub url: String,
    pub filename: String,
    /// Extension without the dot, e.g. `pdf`
    pub file_type: String,
    pub size: Option<u64>,
    pub uploaded_at: Timestamp,
}

impl DocumentationFile {
    pub fn new(url: impl Into<String>, filename: impl Into<String>, file_type: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            id: new_id(),
            url: url.into(),
            filename: filename.into(),
            file_type: file_type.into(),
            size,
            uploaded_at: now(),
        }
    }
}
