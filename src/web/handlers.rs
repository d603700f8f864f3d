//! HTTP request handlers for the search API.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

use super::error::ApiError;
use super::state::AppState;
use crate::metrics;

/// Query string of `GET /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query
    pub q: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Version
    pub version: String,
    /// Records in the catalog, absent when the catalog is malformed
    pub records: Option<usize>,
}

/// Handle search requests.
///
/// GET /api/search?q=...
///
/// Responds with a JSON array of records, best match first.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    metrics::SEARCH_REQUESTS.inc();

    let query = match params {
        Ok(Query(SearchParams { q: Some(q) })) => q,
        Ok(Query(SearchParams { q: None })) => {
            metrics::SEARCH_REJECTED.inc();
            warn!("Search request without query parameter");
            return Err(ApiError::BadRequest(
                "Query parameter 'q' is required".to_string(),
            ));
        }
        Err(rejection) => {
            metrics::SEARCH_REJECTED.inc();
            warn!(error = %rejection, "Invalid search query string");
            return Err(ApiError::BadRequest(format!(
                "Invalid query parameter: {}",
                rejection.body_text()
            )));
        }
    };

    let results = state.engine.search(&query)?;

    let elapsed = start.elapsed();
    metrics::SEARCH_LATENCY.observe(elapsed.as_secs_f64());
    metrics::SEARCH_RESULTS.observe(results.len() as f64);

    info!(
        query = %query,
        results = results.len(),
        took_us = elapsed.as_micros() as u64,
        "Search completed"
    );

    Ok((
        [(header::CACHE_CONTROL, state.cache_control.to_string())],
        Json(results),
    )
        .into_response())
}

/// Health check endpoint.
///
/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.engine.corpus_size().ok(),
    })
}

/// Prometheus metrics endpoint.
///
/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    let output = metrics::gather_metrics();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], output)
}
