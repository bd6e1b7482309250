//! API error taxonomy
//!
//! Every error renders as `{"message": "..."}` with its status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::store::StoreError;

use super::response::MessageBody;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Malformed or incomplete input, detected before touching the store
    #[error("{0}")]
    Validation(String),

    /// Referenced id does not exist
    #[error("Not found")]
    NotFound,

    /// Storage or runtime failure
    #[error("{0}")]
    Service(String),

    /// Request came from an origin outside the allow-list
    #[error("Origin not allowed: {0}")]
    OriginRejected(String),
}

impl ApiError {
    /// Map a store failure, prefixing service errors with the operation
    /// (`Read`, `Create`, `Update`, `Delete`)
    pub fn from_store(operation: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Service(format!("{} failed: {}", operation, other)),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::OriginRejected(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(MessageBody::new(self.to_string()));
        (status, body).into_response()
    }
}
