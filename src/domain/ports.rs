use crate::domain::model::{
    LookupQuery, NewProduct, Product, ProductDescriptor, Ranking, RankingUpdate,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Holds every ranking. Implementations must keep product ranks contiguous
/// after each call and apply each mutation entirely or not at all.
pub trait RankingStore: Send + Sync {
    fn create(&self, title: &str) -> Result<Ranking>;
    fn get(&self, id: &str) -> Result<Option<Ranking>>;
    fn update(&self, id: &str, update: RankingUpdate) -> Result<Ranking>;
    /// Returns `false` when no such ranking exists.
    fn delete(&self, id: &str) -> Result<bool>;
    fn add_product(&self, ranking_id: &str, product: NewProduct) -> Result<Product>;
    /// Returns `false` when the ranking or the product is absent.
    fn remove_product(&self, ranking_id: &str, product_id: &str) -> Result<bool>;
    /// Returns `false` when the ranking is absent or `ordered_ids` is not a
    /// permutation of its product ids.
    fn reorder(&self, ranking_id: &str, ordered_ids: &[String]) -> Result<bool>;
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn lookup(&self, query: &LookupQuery) -> Result<ProductDescriptor>;
}
