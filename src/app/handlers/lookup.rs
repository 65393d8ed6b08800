use crate::app::response::{ApiQuery, ApiResult};
use crate::core::AppState;
use crate::domain::model::{LookupQuery, ProductDescriptor};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    #[serde(alias = "asin")]
    pub identifier: Option<String>,
    pub keyword: Option<String>,
}

impl From<LookupParams> for LookupQuery {
    fn from(params: LookupParams) -> Self {
        Self {
            identifier: params.identifier,
            keyword: params.keyword,
        }
    }
}

pub async fn lookup_product(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LookupParams>,
) -> ApiResult<ProductDescriptor> {
    let query = LookupQuery::from(params);
    let descriptor = state.catalog.lookup(&query).await?;
    tracing::debug!(source_id = %descriptor.source_id, "Catalog lookup succeeded");
    Ok(Json(descriptor))
}
