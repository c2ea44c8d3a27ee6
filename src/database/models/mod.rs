pub mod access_locks;
pub mod documentation;
pub mod floor_plan;
pub mod furniture;
pub mod lead;
pub mod media;
pub mod owner;
pub mod partner;
pub mod patch;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::database::store::Collection;

pub use access_locks::{AccessAndLocks, AccessSection, SectionPatch};
pub use documentation::{PropertyDocumentation, SecuritySystemItem, SecuritySystemItemCreate, SecuritySystemItemPatch};
pub use floor_plan::{Annotation, AnnotationCreate, AnnotationPatch, FloorPlan, FloorPlanPatch};
pub use furniture::{FurnitureEquipment, FurnitureEquipmentPatch, FurnitureItem, FurnitureItemCreate, FurnitureItemPatch};
pub use lead::{Lead, LeadCreate, LeadStatus};
pub use media::{DocumentationFile, DocumentationImage, VideoData};
pub use owner::{LoginRequest, Owner, OwnerCreate, OwnerStatus, OwnerView, StatusUpdate};
pub use partner::{Partner, PartnerCreate, PartnerPatch};
pub use patch::Patch;

/// A document stored at most once per owner, keyed by `owner_id`
pub trait OwnerDocument: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    /// Default document for an owner that has none yet
    fn new(owner_id: &str) -> Self;

    fn owner_id(&self) -> &str;

    /// Stamp `updated_at`
    fn touch(&mut self);
}

/// An element of an embedded list, addressed by its `id`
pub trait ListItem {
    fn id(&self) -> &str;

    /// Stamp the item's own `updated_at`, for items that carry one
    fn touch(&mut self) {}
}
