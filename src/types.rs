/// Shared identity and timestamp primitives used by every stored entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// UTC timestamp stored on documents, list items and media references
pub type Timestamp = DateTime<Utc>;

/// Generate a fresh entity identifier (UUID v4, hyphenated string form)
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time
pub fn now() -> Timestamp {
    Utc::now()
}
