//! API error types mapped to HTTP status codes.
//!
//! Every variant produces a JSON body `{"error": "message"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::metrics;
use crate::search::SearchError;

/// Error returned from API handlers.
///
/// - `BadRequest` → 400
/// - `Internal` → 500
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters (400).
    #[error("{0}")]
    BadRequest(String),
    /// Unexpected server-side failure (500).
    #[error("{0}")]
    Internal(String),
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Corpus(cause) => {
                metrics::CORPUS_ERRORS.inc();
                error!(error = %cause, "Course data failed validation");
                ApiError::Internal("Course data is unavailable".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
