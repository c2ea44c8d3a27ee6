pub mod access_locks;
pub mod documentation;
pub mod error;
pub mod floor_plan;
pub mod furniture;
pub mod leads;
pub mod list_items;
pub mod media;
pub mod owner_documents;
pub mod owners;
pub mod partners;

pub use access_locks::AccessLocksService;
pub use documentation::DocumentationService;
pub use error::{DocumentError, ServiceError};
pub use floor_plan::FloorPlanService;
pub use furniture::FurnitureService;
pub use leads::LeadService;
pub use owners::OwnerService;
pub use partners::PartnerService;
