use crate::core::AppState;
use crate::utils::error::{ErrorCategory, RankingError, Result};
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub type ApiResult<T> = Result<Json<T>>;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Success {
    pub success: bool,
}

pub fn success() -> Json<Success> {
    Json(Success { success: true })
}

impl IntoResponse for RankingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.category() {
            ErrorCategory::Internal | ErrorCategory::Configuration => {
                tracing::error!(
                    "❌ Request failed: {} (category: {:?})",
                    self,
                    self.category()
                );
            }
            _ => tracing::debug!(status = status.as_u16(), "request rejected: {}", self),
        }

        (status, Json(json!({ "error": self.user_friendly_message() }))).into_response()
    }
}

/// Query string extractor whose rejections use the `{error}` body instead of
/// axum's plain-text default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RankingError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| RankingError::invalid_input("query", rejection.body_text()))
    }
}

/// Request body read as a JSON object, see [`parse_body`]. Bodies over
/// `max_body_bytes` are rejected with 413.
#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl FromRequest<AppState> for JsonObject {
    type Rejection = RankingError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                RankingError::PayloadTooLarge {
                    limit: state.max_body_bytes,
                }
            } else {
                RankingError::invalid_input("body", rejection.body_text())
            }
        })?;
        parse_body(&body).map(Self)
    }
}

/// Parses a request body into a JSON object without imposing field types, so
/// handlers can report missing or mistyped fields by name.
pub fn parse_body(body: &Bytes) -> Result<Map<String, Value>> {
    if body.is_empty() {
        return Err(RankingError::input_missing("body"));
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(RankingError::invalid_input("body", "must be a JSON object")),
        Err(e) => Err(RankingError::invalid_input(
            "body",
            format!("invalid JSON: {}", e),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::rankings::RankingIdQuery;
    use axum::body::Body;
    use axum::http::header;

    #[test]
    fn test_parse_body_accepts_objects_only() {
        let map = parse_body(&Bytes::from_static(br#"{"title":"x"}"#)).unwrap();
        assert_eq!(map["title"], "x");

        let cases: [&[u8]; 3] = [b"", b"[1,2]", b"{not json"];
        for raw in cases {
            let err = parse_body(&Bytes::copy_from_slice(raw)).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_api_query_rejection_is_client_error() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/api/rankings?id=a&id=b")
            .body(())
            .unwrap()
            .into_parts();
        let err = ApiQuery::<RankingIdQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::InvalidInput { ref field, .. } if field == "query"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_object_reads_body() {
        let state = AppState::in_memory();
        let req = axum::http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"Top Gifts"}"#))
            .unwrap();
        let JsonObject(map) = JsonObject::from_request(req, &state).await.unwrap();
        assert_eq!(map["title"], "Top Gifts");
    }

    #[test]
    fn test_error_response_status() {
        let response = RankingError::CapacityExceeded { limit: 20 }.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = RankingError::PayloadTooLarge { limit: 64 }.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = RankingError::StorePoisoned.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
