use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// 1-based position inside the owning ranking.
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

impl Ranking {
    pub fn is_full(&self) -> bool {
        self.products.len() >= crate::domain::ranks::MAX_PRODUCTS
    }
}

/// Fields supplied by the caller when adding a product; id and rank are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub image_url: Option<String>,
    pub link: String,
    pub source_id: Option<String>,
}

/// Partial update merged into an existing ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingUpdate {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupQuery {
    pub identifier: Option<String>,
    pub keyword: Option<String>,
}

impl LookupQuery {
    pub fn by_identifier(identifier: &str) -> Self {
        Self {
            identifier: Some(identifier.to_string()),
            keyword: None,
        }
    }

    pub fn by_keyword(keyword: &str) -> Self {
        Self {
            identifier: None,
            keyword: Some(keyword.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.identifier) && blank(&self.keyword)
    }
}

/// Product data returned by a catalog lookup, used to prefill the add-product form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDescriptor {
    pub source_id: String,
    pub name: String,
    pub image_url: String,
    pub link: String,
    pub price: String,
}
