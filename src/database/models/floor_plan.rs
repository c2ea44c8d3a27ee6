use serde::{Deserialize, Serialize};

use super::patch::{nullable, Patch};
use super::{ListItem, OwnerDocument};
use crate::apply_present;
use crate::database::store::Collection;
use crate::types::{new_id, now, Timestamp};

fn default_color() -> Option<String> {
    Some("#000000".to_string())
}

/// Mark drawn on the floor plan image. Coordinates are percentages of the image size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default = "new_id")]
    pub id: String,
    /// text, marker, line or rectangle; not enforced
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default = "default_color")]
    pub color: Option<String>,
    #[serde(default = "now")]
    pub created_at: Timestamp,
}

impl ListItem for Annotation {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationCreate {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default = "default_color")]
    pub color: Option<String>,
}

impl From<AnnotationCreate> for Annotation {
    fn from(create: AnnotationCreate) -> Self {
        Self {
            id: new_id(),
            kind: create.kind,
            x: create.x,
            y: create.y,
            text: create.text,
            width: create.width,
            height: create.height,
            color: create.color,
            created_at: now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnotationPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub text: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub width: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub color: Option<Option<String>>,
}

impl Patch<Annotation> for AnnotationPatch {
    fn apply_to(self, target: &mut Annotation) {
        let patch = self;
        apply_present!(patch => target; kind, x, y, text, width, height, color);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Document-level update. `annotations` replaces the whole list; `null` empties it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FloorPlanPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub comment: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub annotations: Option<Option<Vec<Annotation>>>,
}

impl Patch<FloorPlan> for FloorPlanPatch {
    fn apply_to(self, target: &mut FloorPlan) {
        let patch = self;
        apply_present!(patch => target; comment);
        if let Some(annotations) = patch.annotations {
            target.annotations = annotations.unwrap_or_default();
        }
    }
}

impl OwnerDocument for FloorPlan {
    const COLLECTION: Collection = Collection::FloorPlans;

    fn new(owner_id: &str) -> Self {
        let created = now();
        Self {
            id: new_id(),
            owner_id: owner_id.to_string(),
            image_url: None,
            comment: None,
            annotations: Vec::new(),
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
