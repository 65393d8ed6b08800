//! Rank bookkeeping for a ranking's product sequence.
//!
//! Ranks are always the contiguous sequence `1..=N` in sequence order. Both
//! functions here are pure: they take the current sequence and hand back a
//! new one, so a store can compute the result before committing anything.

use crate::domain::model::Product;
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const MAX_PRODUCTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderMismatch {
    LengthMismatch { expected: usize, actual: usize },
    UnknownProduct(String),
    DuplicateProduct(String),
}

impl fmt::Display for ReorderMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {} product ids, got {}", expected, actual)
            }
            Self::UnknownProduct(id) => write!(f, "product {} is not in this ranking", id),
            Self::DuplicateProduct(id) => write!(f, "product {} listed more than once", id),
        }
    }
}

/// Reassigns ranks `1..=N` following the current order.
pub fn reindex(mut products: Vec<Product>) -> Vec<Product> {
    for (index, product) in products.iter_mut().enumerate() {
        product.rank = index + 1;
    }
    products
}

/// Builds the sequence described by `ordered_ids`.
///
/// Succeeds only when `ordered_ids` is a permutation of the current product
/// ids. `products` is left untouched either way.
pub fn reorder(
    products: &[Product],
    ordered_ids: &[String],
) -> Result<Vec<Product>, ReorderMismatch> {
    if ordered_ids.len() != products.len() {
        return Err(ReorderMismatch::LengthMismatch {
            expected: products.len(),
            actual: ordered_ids.len(),
        });
    }

    let by_id: HashMap<&str, &Product> = products.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut seen = HashSet::with_capacity(ordered_ids.len());
    let mut reordered = Vec::with_capacity(ordered_ids.len());

    for id in ordered_ids {
        let product = by_id
            .get(id.as_str())
            .ok_or_else(|| ReorderMismatch::UnknownProduct(id.clone()))?;
        if !seen.insert(id.as_str()) {
            return Err(ReorderMismatch::DuplicateProduct(id.clone()));
        }
        reordered.push((*product).clone());
    }

    Ok(reindex(reordered))
}

pub fn ranks_are_contiguous(products: &[Product]) -> bool {
    products
        .iter()
        .enumerate()
        .all(|(index, product)| product.rank == index + 1)
}
