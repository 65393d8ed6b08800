use crate::app::response::{success, ApiQuery, ApiResult, JsonObject, Success};
use crate::core::AppState;
use crate::domain::model::{Ranking, RankingUpdate};
use crate::utils::error::RankingError;
use crate::utils::validation::required_string;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct RankingIdQuery {
    pub id: Option<String>,
}

fn required_id(query: RankingIdQuery) -> Result<String, RankingError> {
    query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| RankingError::input_missing("id"))
}

pub async fn create_ranking(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> ApiResult<Ranking> {
    let title = required_string("title", body.get("title"))?;

    let ranking = state.store.create(&title)?;
    tracing::info!(ranking_id = %ranking.id, "Created ranking \"{}\"", ranking.title);
    Ok(Json(ranking))
}

pub async fn get_ranking(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RankingIdQuery>,
) -> ApiResult<Ranking> {
    let id = required_id(query)?;
    state
        .store
        .get(&id)?
        .map(Json)
        .ok_or_else(|| RankingError::ranking_not_found(&id))
}

pub async fn update_ranking(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> ApiResult<Ranking> {
    let id = required_string("id", body.get("id"))?;

    let title = match body.get("title") {
        None | Some(Value::Null) => None,
        Some(Value::String(title)) => Some(title.clone()),
        Some(_) => return Err(RankingError::invalid_input("title", "must be a string")),
    };

    let ranking = state.store.update(&id, RankingUpdate { title })?;
    tracing::debug!(ranking_id = %id, "Updated ranking");
    Ok(Json(ranking))
}

pub async fn delete_ranking(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RankingIdQuery>,
) -> ApiResult<Success> {
    let id = required_id(query)?;
    if !state.store.delete(&id)? {
        return Err(RankingError::ranking_not_found(&id));
    }
    tracing::info!(ranking_id = %id, "Deleted ranking");
    Ok(success())
}
