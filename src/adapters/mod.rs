// Adapters layer: concrete implementations of the domain ports.

pub mod catalog;
pub mod ids;
pub mod memory_store;

pub use catalog::{HttpCatalog, StubCatalog};
pub use ids::{SequentialIds, UuidGenerator};
pub use memory_store::InMemoryStore;
