pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{connect_store, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use store::{Collection, DocumentStore, StoreError};
