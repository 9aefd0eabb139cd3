//! Web-layer error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors surfaced by request handlers.
///
/// Storage failures terminate the request with a generic 500; there is no
/// recovery path beyond that.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

/// Result type for request handlers.
pub type AppResult<T> = std::result::Result<T, AppError>;
