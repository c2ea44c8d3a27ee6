use serde::{Deserialize, Serialize};

use crate::types::{new_id, now, Timestamp};

/// `new -> contacted -> converted`, or `new -> rejected`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub address: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadCreate {
    pub address: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<LeadCreate> for Lead {
    fn from(create: LeadCreate) -> Self {
        Self {
            id: new_id(),
            address: create.address,
            name: create.name,
            phone: create.phone,
            email: create.email,
            status: LeadStatus::New,
            notes: None,
            created_at: now(),
        }
    }
}

/// Minimal address check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
        && !email.chars().any(char::is_whitespace)
}
