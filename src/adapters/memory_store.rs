use crate::adapters::ids::UuidGenerator;
use crate::domain::model::{NewProduct, Product, Ranking, RankingUpdate};
use crate::domain::ports::{IdGenerator, RankingStore};
use crate::domain::ranks::{self, MAX_PRODUCTS};
use crate::utils::error::{RankingError, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-lifetime ranking store. Nothing survives a restart.
///
/// Every mutation holds the write lock for its whole read-modify-write, so
/// concurrent requests against one ranking cannot interleave and break the
/// rank sequence.
pub struct InMemoryStore {
    rankings: RwLock<HashMap<String, Ranking>>,
    ids: Box<dyn IdGenerator>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_id_generator(UuidGenerator)
    }

    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            rankings: RwLock::new(HashMap::new()),
            ids: Box::new(ids),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Ranking>>> {
        self.rankings.read().map_err(|_| RankingError::StorePoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Ranking>>> {
        self.rankings.write().map_err(|_| RankingError::StorePoisoned)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingStore for InMemoryStore {
    fn create(&self, title: &str) -> Result<Ranking> {
        if title.trim().is_empty() {
            return Err(RankingError::input_missing("title"));
        }

        let ranking = Ranking {
            id: self.ids.next_id(),
            title: title.to_string(),
            created_at: Utc::now(),
            products: Vec::new(),
        };

        self.write()?.insert(ranking.id.clone(), ranking.clone());
        tracing::debug!(ranking_id = %ranking.id, "created ranking");
        Ok(ranking)
    }

    fn get(&self, id: &str) -> Result<Option<Ranking>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn update(&self, id: &str, update: RankingUpdate) -> Result<Ranking> {
        let mut rankings = self.write()?;
        let ranking = rankings
            .get_mut(id)
            .ok_or_else(|| RankingError::ranking_not_found(id))?;

        if let Some(title) = update.title {
            if title.trim().is_empty() {
                return Err(RankingError::invalid_input("title", "cannot be empty"));
            }
            ranking.title = title;
        }
        Ok(ranking.clone())
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.write()?.remove(id);
        if let Some(ranking) = &removed {
            tracing::debug!(
                ranking_id = %id,
                products = ranking.products.len(),
                "deleted ranking"
            );
        }
        Ok(removed.is_some())
    }

    fn add_product(&self, ranking_id: &str, product: NewProduct) -> Result<Product> {
        if product.name.trim().is_empty() {
            return Err(RankingError::input_missing("name"));
        }
        if product.link.trim().is_empty() {
            return Err(RankingError::input_missing("link"));
        }

        let mut rankings = self.write()?;
        let ranking = rankings
            .get_mut(ranking_id)
            .ok_or_else(|| RankingError::ranking_not_found(ranking_id))?;

        if ranking.products.len() >= MAX_PRODUCTS {
            return Err(RankingError::CapacityExceeded {
                limit: MAX_PRODUCTS,
            });
        }

        let created = Product {
            id: self.ids.next_id(),
            name: product.name,
            image_url: product.image_url,
            link: product.link,
            source_id: product.source_id,
            rank: ranking.products.len() + 1,
        };
        ranking.products.push(created.clone());
        Ok(created)
    }

    fn remove_product(&self, ranking_id: &str, product_id: &str) -> Result<bool> {
        let mut rankings = self.write()?;
        let Some(ranking) = rankings.get_mut(ranking_id) else {
            return Ok(false);
        };
        let Some(index) = ranking.products.iter().position(|p| p.id == product_id) else {
            return Ok(false);
        };

        let mut products = std::mem::take(&mut ranking.products);
        products.remove(index);
        ranking.products = ranks::reindex(products);
        Ok(true)
    }

    fn reorder(&self, ranking_id: &str, ordered_ids: &[String]) -> Result<bool> {
        let mut rankings = self.write()?;
        let Some(ranking) = rankings.get_mut(ranking_id) else {
            return Ok(false);
        };

        match ranks::reorder(&ranking.products, ordered_ids) {
            Ok(products) => {
                ranking.products = products;
                Ok(true)
            }
            Err(mismatch) => {
                tracing::warn!(ranking_id = %ranking_id, "reorder rejected: {}", mismatch);
                Ok(false)
            }
        }
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
