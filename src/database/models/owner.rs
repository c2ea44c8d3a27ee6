use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{new_id, now, Timestamp};

/// Sales pipeline stage of an owner, set from the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerStatus {
    Ringt,
    #[serde(rename = "Sendt tilbud")]
    SendtTilbud,
    Onboarding,
    Kontrakt,
    Lost,
}

impl OwnerStatus {
    pub const ALL: [OwnerStatus; 5] = [
        OwnerStatus::Ringt,
        OwnerStatus::SendtTilbud,
        OwnerStatus::Onboarding,
        OwnerStatus::Kontrakt,
        OwnerStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerStatus::Ringt => "Ringt",
            OwnerStatus::SendtTilbud => "Sendt tilbud",
            OwnerStatus::Onboarding => "Onboarding",
            OwnerStatus::Kontrakt => "Kontrakt",
            OwnerStatus::Lost => "Lost",
        }
    }
}

impl fmt::Display for OwnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OwnerStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = OwnerStatus::ALL.iter().map(|s| s.as_str()).collect();
                format!("Invalid status '{}'. Must be one of: {}", s, allowed.join(", "))
            })
    }
}

/// Stored owner record. Never serialized to clients; see [`OwnerView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    #[serde(default)]
    pub lead_id: Option<String>,
    pub address: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub properties: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OwnerStatus>,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_data: Option<Value>,
}

fn default_true() -> bool {
    true
}

impl Owner {
    pub fn new(create: OwnerCreate, password_hash: String, lead_id: Option<String>) -> Self {
        Self {
            id: new_id(),
            lead_id,
            address: create.address,
            name: create.name,
            phone: create.phone,
            email: create.email,
            password_hash,
            created_at: now(),
            is_active: true,
            properties: Vec::new(),
            status: None,
            onboarding_completed: false,
            onboarding_data: None,
        }
    }
}

/// Client-facing owner, without the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerView {
    pub id: String,
    pub lead_id: Option<String>,
    pub address: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub created_at: Timestamp,
    pub is_active: bool,
    pub properties: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OwnerStatus>,
    pub onboarding_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_data: Option<Value>,
}

impl From<Owner> for OwnerView {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            lead_id: owner.lead_id,
            address: owner.address,
            name: owner.name,
            phone: owner.phone,
            email: owner.email,
            created_at: owner.created_at,
            is_active: owner.is_active,
            properties: owner.properties,
            status: owner.status,
            onboarding_completed: owner.onboarding_completed,
            onboarding_data: owner.onboarding_data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerCreate {
    pub address: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Raw status body; the value is checked against [`OwnerStatus`] by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}
