use crate::service::ServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::models::ErrorResponse;
use shared::validation::FieldErrors;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure the HTTP surface can report. Rendered as an
/// [`ErrorResponse`] envelope.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Conflict(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorResponse {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or_default();
        match self {
            ApiError::Validation(details) => {
                ErrorResponse::new("Validation Failed", "the provided data is invalid")
                    .with_details(details)
            }
            ApiError::Internal => ErrorResponse::new(reason, "an unexpected error occurred"),
            ApiError::MethodNotAllowed => {
                ErrorResponse::new(reason, "method not allowed for this resource")
            }
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message) => ErrorResponse::new(reason, message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidId => ApiError::BadRequest(err.to_string()),
            ServiceError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ServiceError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            ServiceError::Internal(e) => {
                tracing::error!("Personality store failure: {:?}", e);
                ApiError::Internal
            }
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(details: FieldErrors) -> Self {
        ApiError::Validation(details)
    }
}
