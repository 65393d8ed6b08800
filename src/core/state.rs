use crate::adapters::{HttpCatalog, InMemoryStore, StubCatalog};
use crate::config::{AppConfig, LookupMode};
use crate::domain::ports::{CatalogLookup, RankingStore};
use crate::utils::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handles passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RankingStore>,
    pub catalog: Arc<dyn CatalogLookup>,
    pub public_base_url: Option<String>,
    pub max_body_bytes: usize,
    request_seq: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(store: Arc<dyn RankingStore>, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            store,
            catalog,
            public_base_url: None,
            max_body_bytes: crate::config::ServerConfig::default().max_body_bytes,
            request_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// In-memory store with the stub catalog.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(StubCatalog::default()),
        )
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog: Arc<dyn CatalogLookup> = match config.lookup.mode {
            LookupMode::Stub => Arc::new(StubCatalog::from_config(&config.lookup)),
            LookupMode::Http => {
                let endpoint = config.lookup.endpoint.as_deref().unwrap_or_default();
                tracing::info!("Catalog lookups forwarded to {}", endpoint);
                Arc::new(HttpCatalog::new(endpoint, config.lookup.timeout())?)
            }
        };

        let mut state = Self::new(Arc::new(InMemoryStore::new()), catalog);
        state.public_base_url = config
            .server
            .public_base_url
            .as_ref()
            .map(|url| url.trim_end_matches('/').to_string());
        state.max_body_bytes = config.server.max_body_bytes;
        Ok(state)
    }

    pub fn next_request_id(&self) -> String {
        let id = self.request_seq.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_increase() {
        let state = AppState::in_memory();
        assert_eq!(state.next_request_id(), "req-0000000000000001");
        assert_eq!(state.next_request_id(), "req-0000000000000002");
    }

    #[test]
    fn test_from_config_trims_public_base_url() {
        let mut config = AppConfig::default();
        config.server.public_base_url = Some("https://rank.example.com/".to_string());
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(
            state.public_base_url.as_deref(),
            Some("https://rank.example.com")
        );
        assert!(state.store.is_empty().unwrap());
    }
}
