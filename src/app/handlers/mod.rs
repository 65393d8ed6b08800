pub mod lookup;
pub mod products;
pub mod rankings;

use crate::app::response::ApiResult;
use crate::core::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub rankings: usize,
}

pub async fn healthz(State(state): State<AppState>) -> ApiResult<Health> {
    Ok(Json(Health {
        status: "ok",
        rankings: state.store.len()?,
    }))
}
