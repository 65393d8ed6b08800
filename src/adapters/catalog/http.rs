use crate::domain::model::{LookupQuery, ProductDescriptor};
use crate::domain::ports::CatalogLookup;
use crate::utils::error::{RankingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Forwards lookups to an external catalog service that answers with a
/// `ProductDescriptor` JSON document. Requests are unsigned.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    endpoint: String,
}

impl HttpCatalog {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl CatalogLookup for HttpCatalog {
    async fn lookup(&self, query: &LookupQuery) -> Result<ProductDescriptor> {
        if query.is_empty() {
            return Err(RankingError::input_missing("identifier or keyword"));
        }

        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(identifier) = query.identifier.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("identifier", identifier));
        }
        if let Some(keyword) = query.keyword.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("keyword", keyword));
        }

        tracing::debug!(endpoint = %self.endpoint, "querying catalog: {:?}", params);

        let response = self.client.get(&self.endpoint).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RankingError::LookupFailed {
                message: format!("catalog answered with status {}", status),
            });
        }

        response
            .json::<ProductDescriptor>()
            .await
            .map_err(|e| RankingError::LookupFailed {
                message: format!("unreadable catalog response: {}", e),
            })
    }
}
