pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::{HttpCatalog, InMemoryStore, SequentialIds, StubCatalog, UuidGenerator};
pub use app::{build_router, serve};
pub use config::AppConfig;
pub use crate::core::AppState;
pub use domain::model::{LookupQuery, NewProduct, Product, ProductDescriptor, Ranking, RankingUpdate};
pub use domain::ports::{CatalogLookup, IdGenerator, RankingStore};
pub use utils::error::{RankingError, Result};
