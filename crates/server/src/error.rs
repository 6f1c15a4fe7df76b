//! API error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orgdir::DirectoryError;
use serde_json::json;
use thiserror::Error;

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Handler error, rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message, without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::NotFound(detail)
            | ApiError::BadRequest(detail)
            | ApiError::Unauthorized(detail)
            | ApiError::Internal(detail) => detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let body = Json(json!({
            "detail": self.detail()
        }));
        (status, body).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DirectoryError::InvalidInput(msg) => ApiError::BadRequest(msg),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}
