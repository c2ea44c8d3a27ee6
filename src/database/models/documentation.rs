use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::media::{DocumentationFile, DocumentationImage};
use super::patch::{nullable, Patch};
use super::{ListItem, OwnerDocument};
use crate::apply_present;
use crate::database::store::Collection;
use crate::types::{new_id, now, Timestamp};

fn default_category() -> String {
    "security_systems".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySystemItem {
    pub id: String,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub location: String,
    pub system_type: String,
    #[serde(default)]
    pub last_checked: Option<String>,
    #[serde(default)]
    pub installed_date: Option<String>,
    #[serde(default)]
    pub installer: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub images: Vec<DocumentationImage>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub documents: Vec<DocumentationFile>,
    #[serde(default)]
    pub additional_info: Map<String, Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ListItem for SecuritySystemItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

impl ListItem for DocumentationImage {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySystemItemCreate {
    pub name: String,
    pub location: String,
    pub system_type: String,
    #[serde(default)]
    pub last_checked: Option<String>,
    #[serde(default)]
    pub installed_date: Option<String>,
    #[serde(default)]
    pub installer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub additional_info: Option<Map<String, Value>>,
}

impl From<SecuritySystemItemCreate> for SecuritySystemItem {
    fn from(create: SecuritySystemItemCreate) -> Self {
        let created = now();
        Self {
            id: new_id(),
            name: create.name,
            category: default_category(),
            location: create.location,
            system_type: create.system_type,
            last_checked: create.last_checked,
            installed_date: create.installed_date,
            installer: create.installer,
            video_url: None,
            images: Vec::new(),
            description: create.description,
            notes: create.notes,
            documents: Vec::new(),
            additional_info: create.additional_info.unwrap_or_default(),
            created_at: created,
            updated_at: created,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecuritySystemItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub system_type: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_checked: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub installed_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub installer: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub video_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub additional_info: Option<Map<String, Value>>,
}

impl Patch<SecuritySystemItem> for SecuritySystemItemPatch {
    fn apply_to(self, target: &mut SecuritySystemItem) {
        let patch = self;
        apply_present!(patch => target;
            name, location, system_type, last_checked, installed_date,
            installer, video_url, description, notes, additional_info);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDocumentation {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub security_systems: Vec<SecuritySystemItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OwnerDocument for PropertyDocumentation {
    const COLLECTION: Collection = Collection::PropertyDocumentation;

    fn new(owner_id: &str) -> Self {
        let created = now();
        Self {
            id: new_id(),
            owner_id: owner_id.to_string(),
            property_id: None,
            security_systems: Vec::new(),
            created_at: created,
            updated_at: created,
        }
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_fills_defaults() {
        let create: SecuritySystemItemCreate = serde_json::from_value(json!({
            "name": "Sikringsskap (Hoved)",
            "location": "Gang",
            "system_type": "Elektrisk"
        }))
        .unwrap();
        let item = SecuritySystemItem::from(create);

        assert_eq!(item.category, "security_systems");
        assert!(item.images.is_empty() && item.documents.is_empty());
        assert!(item.additional_info.is_empty());
    }
}
