use crate::config::LookupConfig;
use crate::domain::model::{LookupQuery, ProductDescriptor};
use crate::domain::ports::CatalogLookup;
use crate::utils::error::{RankingError, Result};
use async_trait::async_trait;
use url::Url;

pub const DEFAULT_SOURCE_ID: &str = "B08N5WRWNW";
pub const DEFAULT_NAME: &str = "Sample product";
pub const STUB_PRICE: &str = "¥1,980";

/// Deterministic stand-in for a product catalog. Echoes the query back in a
/// fixed descriptor so the add-product form can be exercised offline.
#[derive(Debug, Clone)]
pub struct StubCatalog {
    link_base: String,
    placeholder_image: String,
}

impl StubCatalog {
    pub fn new(link_base: &str, placeholder_image: &str) -> Self {
        Self {
            link_base: link_base.trim_end_matches('/').to_string(),
            placeholder_image: placeholder_image.to_string(),
        }
    }

    pub fn from_config(config: &LookupConfig) -> Self {
        Self::new(&config.link_base, &config.placeholder_image)
    }

    pub fn describe(&self, query: &LookupQuery) -> Result<ProductDescriptor> {
        if query.is_empty() {
            return Err(RankingError::input_missing("identifier or keyword"));
        }

        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        };
        let source_id = non_blank(&query.identifier).unwrap_or_else(|| DEFAULT_SOURCE_ID.to_string());
        let name = non_blank(&query.keyword).unwrap_or_else(|| DEFAULT_NAME.to_string());

        Ok(ProductDescriptor {
            link: self.product_link(&source_id)?,
            source_id,
            name,
            image_url: self.placeholder_image.clone(),
            price: STUB_PRICE.to_string(),
        })
    }
}

impl StubCatalog {
    /// `<link_base>/dp/<source_id>` with the id escaped as a single path segment.
    fn product_link(&self, source_id: &str) -> Result<String> {
        let invalid_base = || RankingError::LookupFailed {
            message: format!("link base '{}' is not a usable URL", self.link_base),
        };
        let mut link = Url::parse(&self.link_base).map_err(|_| invalid_base())?;
        link.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .push("dp")
            .push(source_id);
        Ok(link.into())
    }
}

impl Default for StubCatalog {
    fn default() -> Self {
        Self::from_config(&LookupConfig::default())
    }
}

#[async_trait]
impl CatalogLookup for StubCatalog {
    async fn lookup(&self, query: &LookupQuery) -> Result<ProductDescriptor> {
        self.describe(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_by_identifier_echoes_it() {
        let catalog = StubCatalog::new("https://shop.example/", "https://img.example/p.jpg");
        let descriptor = catalog
            .lookup(&LookupQuery::by_identifier("B000TEST01"))
            .await
            .unwrap();

        assert_eq!(descriptor.source_id, "B000TEST01");
        assert_eq!(descriptor.name, DEFAULT_NAME);
        assert_eq!(descriptor.link, "https://shop.example/dp/B000TEST01");
        assert_eq!(descriptor.image_url, "https://img.example/p.jpg");
        assert_eq!(descriptor.price, STUB_PRICE);
    }

    #[tokio::test]
    async fn test_lookup_by_keyword_uses_default_identifier() {
        let descriptor = StubCatalog::default()
            .lookup(&LookupQuery::by_keyword("electric kettle"))
            .await
            .unwrap();
        assert_eq!(descriptor.name, "electric kettle");
        assert_eq!(descriptor.source_id, DEFAULT_SOURCE_ID);
        assert!(descriptor.link.ends_with("/dp/B08N5WRWNW"));
    }

    #[tokio::test]
    async fn test_identifier_is_escaped_in_link() {
        let catalog = StubCatalog::new("https://shop.example", "https://img.example/p.jpg");
        let descriptor = catalog
            .lookup(&LookupQuery::by_identifier("a b/c?d"))
            .await
            .unwrap();

        assert_eq!(descriptor.source_id, "a b/c?d");
        assert_eq!(descriptor.link, "https://shop.example/dp/a%20b%2Fc%3Fd");
    }

    #[tokio::test]
    async fn test_unusable_link_base_fails_lookup() {
        let err = StubCatalog::new("not a url", "")
            .lookup(&LookupQuery::by_identifier("B000TEST01"))
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::LookupFailed { .. }));
    }

    #[tokio::test]
    async fn test_lookup_without_input_is_rejected() {
        let err = StubCatalog::default()
            .lookup(&LookupQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::InputMissing { .. }));
    }
}
