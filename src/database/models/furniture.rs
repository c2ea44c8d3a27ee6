use serde::{Deserialize, Serialize};

use super::patch::{nullable, Patch};
use super::{ListItem, OwnerDocument};
use crate::apply_present;
use crate::database::store::Collection;
use crate::types::{new_id, now, Timestamp};

fn default_category() -> String {
    "other".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// kitchen, tableware, household or other
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub checked: bool,
    pub created_at: Timestamp,
}

impl FurnitureItem {
    fn checklist_entry(category: &str, (name, quantity, comment): (&str, &str, &str)) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            quantity: quantity.to_string(),
            comment: Some(comment.to_string()),
            category: category.to_string(),
            checked: false,
            created_at: now(),
        }
    }
}

impl ListItem for FurnitureItem {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FurnitureItemCreate {
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
}

impl From<FurnitureItemCreate> for FurnitureItem {
    fn from(create: FurnitureItemCreate) -> Self {
        Self {
            id: new_id(),
            name: create.name,
            quantity: create.quantity,
            comment: create.comment,
            category: create.category,
            checked: false,
            created_at: now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FurnitureItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub comment: Option<Option<String>>,
    #[serde(default)]
    pub checked: Option<bool>,
}

impl Patch<FurnitureItem> for FurnitureItemPatch {
    fn apply_to(self, target: &mut FurnitureItem) {
        let patch = self;
        apply_present!(patch => target; name, quantity, comment, checked);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureEquipment {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub general_comments: Option<String>,
    #[serde(default)]
    pub items: Vec<FurnitureItem>,
    #[serde(default)]
    pub last_confirmed: Option<Timestamp>,
    #[serde(default)]
    pub confirmed_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FurnitureEquipmentPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub general_comments: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_confirmed: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "nullable")]
    pub confirmed_by: Option<Option<String>>,
}

impl Patch<FurnitureEquipment> for FurnitureEquipmentPatch {
    fn apply_to(self, target: &mut FurnitureEquipment) {
        let patch = self;
        apply_present!(patch => target; general_comments, last_confirmed, confirmed_by);
    }
}

const KITCHEN: &[(&str, &str, &str)] = &[
    ("Stekepanner (Non-stick, induksjon)", "2", "medium + stor"),
    ("Små/medium kasseroller (induksjon)", "2", ""),
    ("Gryte (induksjon)", "1", ""),
    ("Stekebrett", "1", ""),
    ("Stekerist", "1", ""),
    ("Boller til baking", "Sett på 3-4 stk", ""),
    ("Pastasil", "1", ""),
    ("Skjærebrett", "2", ""),
    ("Knivsett", "4 stk", "3 skjærekniver + brødkniv"),
    ("Kjøkkenvekt", "1", ""),
    ("Flaskeåpner / vinåpner", "2", ""),
    ("Grønnsaksrenser", "1", ""),
    ("Rivjern", "1", ""),
    ("Saks", "1-2", ""),
    ("Ovnhansker / gryteholdere", "2-4", ""),
    ("Gryteunderlag", "4", ""),
    ("Kaffetrakter", "1", ""),
    ("Vannkoker", "1", ""),
    ("Tørkerull-holder", "1", ""),
    ("Målebegere", "2", ""),
    ("Ostehøvel", "2", ""),
    ("Kjøkkenredskaper (stekespade etc.)", "2 fulle sett", ""),
];

const TABLEWARE: &[(&str, &str, &str)] = &[
    ("Store tallerkener", "2x Max gjester", ""),
    ("Små tallerkener", "2x Max gjester", ""),
    ("Store skåler", "2x Max gjester", ""),
    ("Små skåler", "2x Max gjester", ""),
    ("Kaffekopper", "2x Max gjester", ""),
    ("Glass", "2x Max gjester", ""),
    ("Vinglass", "1x Max gjester", ""),
    ("Bestikk (Kniver, gafler, skjeer)", "2x Max gjester", ""),
];

const HOUSEHOLD: &[(&str, &str, &str)] = &[
    ("Vaskemaskin", "1", ""),
    ("Strykebrett + strykejern", "1 + 1", ""),
    ("Tørkestativ", "1", ""),
    ("Hårføner", "1", ""),
    ("Vaskenal til dusj", "1", ""),
    ("Knagger til håndklær og klær", "Tilstrekkelig", ""),
    ("Støvsuger", "1", ""),
    ("Mopp", "1", ""),
    ("Bøtte", "1", ""),
];

/// Starting checklist for a new rental unit, all unchecked
pub fn default_items() -> Vec<FurnitureItem> {
    let sets = [("kitchen", KITCHEN), ("tableware", TABLEWARE), ("household", HOUSEHOLD)];
    sets.into_iter()
        .flat_map(|(category, entries)| entries.iter().map(move |entry| FurnitureItem::checklist_entry(category, *entry)))
        .collect()
}

impl OwnerDocument for FurnitureEquipment {
    const COLLECTION: Collection = Collection::FurnitureEquipment;

    fn new(owner_id: &str) -> Self {
        let created = now();
        Self {
            id: new_id(),
            owner_id: owner_id.to_string(),
            general_comments: None,
            items: default_items(),
            last_confirmed: None,
            confirmed_by: None,
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
