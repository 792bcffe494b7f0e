//! Request extractors that reject with the JSON error envelope instead of
//! axum's plain-text rejections.

use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Numeric `{id}` path segment.
///
/// Segments that are not all digits are treated as an unmatched route (404).
/// Digits that overflow `u32` are a malformed id (400).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub u32);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound("resource not found".to_string()))?;

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::NotFound("resource not found".to_string()));
        }
        raw.parse()
            .map(PathId)
            .map_err(|_| ApiError::BadRequest("invalid id".to_string()))
    }
}

/// JSON request body, decoded regardless of the request's `Content-Type`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::BadRequest("invalid request body".to_string()))?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            ApiError::BadRequest("invalid request body".to_string())
        })
    }
}
