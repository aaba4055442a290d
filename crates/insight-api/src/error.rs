// Request-level error mapping
//
// Validation failures are the client's fault (400), storage failures are
// ours (500). Both bodies are plain text; storage text is passed through
// so operators can diagnose from the response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use insight_core::ValidationError;
use insight_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(e) => tracing::warn!(field = ?e.field(), "Rejected event: {}", e),
            ApiError::Persistence(e) => tracing::error!("Storage failure: {}", e),
        }
        (self.status(), self.to_string()).into_response()
    }
}
