use crate::app::response::{success, ApiQuery, ApiResult, JsonObject, Success};
use crate::core::AppState;
use crate::domain::model::{NewProduct, Product};
use crate::utils::error::RankingError;
use crate::utils::validation::{optional_string, required_string, string_array};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub ranking_id: Option<String>,
    pub product_id: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn add_product(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> ApiResult<Product> {
    let ranking_id = required_string("rankingId", body.get("rankingId"))?;
    let name = required_string("name", body.get("name"))?;
    let link = required_string("link", body.get("link"))?;
    let image_url = optional_string("imageUrl", body.get("imageUrl"))?;
    // older clients send the catalog identifier as `asin`
    let source_id = match optional_string("sourceId", body.get("sourceId"))? {
        Some(id) => Some(id),
        None => optional_string("asin", body.get("asin"))?,
    };

    let product = state.store.add_product(
        &ranking_id,
        NewProduct {
            name,
            image_url,
            link,
            source_id,
        },
    )?;
    tracing::info!(
        ranking_id = %ranking_id,
        product_id = %product.id,
        rank = product.rank,
        "Added product \"{}\"",
        product.name
    );
    Ok(Json(product))
}

pub async fn remove_product(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> ApiResult<Success> {
    let (Some(ranking_id), Some(product_id)) =
        (non_blank(query.ranking_id), non_blank(query.product_id))
    else {
        return Err(RankingError::input_missing("rankingId and productId"));
    };

    if !state.store.remove_product(&ranking_id, &product_id)? {
        return Err(RankingError::product_not_found(&product_id));
    }
    tracing::info!(ranking_id = %ranking_id, product_id = %product_id, "Removed product");
    Ok(success())
}

pub async fn reorder_products(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> ApiResult<Success> {
    let ranking_id = required_string("rankingId", body.get("rankingId"))?;
    let product_ids = string_array("productIds", body.get("productIds"))?;

    if !state.store.reorder(&ranking_id, &product_ids)? {
        return Err(RankingError::ReorderRejected {
            reason: format!(
                "ranking {} does not exist or the id list is not a permutation of its products",
                ranking_id
            ),
        });
    }
    tracing::debug!(ranking_id = %ranking_id, "Reordered {} products", product_ids.len());
    Ok(success())
}
