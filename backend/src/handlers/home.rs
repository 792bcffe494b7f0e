use crate::error::ApiError;
use crate::extract::PathId;
use axum::Json;
use shared::models::MessageResponse;

pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Personalities REST API!".to_string(),
    })
}

/// Fallback for any path that matches no route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("resource not found".to_string())
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Same as [`method_not_allowed`] for `{id}` routes, except that a
/// non-numeric id still counts as an unmatched route.
pub async fn id_method_not_allowed(PathId(_): PathId) -> ApiError {
    ApiError::MethodNotAllowed
}
