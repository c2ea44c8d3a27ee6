use serde::{Deserialize, Serialize};

use crate::types::{new_id, now, Timestamp};

fn default_status() -> String {
    "Aktiv".to_string()
}

/// Service provider attached to an owner (cleaning, maintenance, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub owner_id: String,
    /// daglig-drift, profesjonelle, vedlikehold or spesialiserte
    pub category: String,
    pub name: String,
    pub service: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_certified: bool,
    #[serde(default = "default_status")]
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerCreate {
    pub category: String,
    pub name: String,
    pub service: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_certified: bool,
    #[serde(default = "default_status")]
    pub status: String,
}

impl Partner {
    pub fn new(owner_id: &str, create: PartnerCreate) -> Self {
        let created = now();
        Self {
            id: new_id(),
            owner_id: owner_id.to_string(),
            category: create.category,
            name: create.name,
            service: create.service,
            phone: create.phone,
            email: create.email,
            additional_info: create.additional_info,
            notes: create.notes,
            is_certified: create.is_certified,
            status: create.status,
            created_at: created,
            updated_at: created,
        }
    }
}

/// Partner update. Only non-null fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartnerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_certified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
