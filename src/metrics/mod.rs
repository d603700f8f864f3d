//! Prometheus metrics for the search server
//!
//! This module provides observability through Prometheus-compatible metrics
//! for search requests and the loaded catalog.

use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::Once;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // Search metrics
    // ============================================================================

    /// Total number of search requests
    pub static ref SEARCH_REQUESTS: Counter = Counter::with_opts(
        Opts::new(
            "coursefind_search_requests_total",
            "Total number of search requests"
        )
    ).expect("Failed to create SEARCH_REQUESTS counter");

    /// Requests rejected for a missing or invalid query parameter
    pub static ref SEARCH_REJECTED: Counter = Counter::with_opts(
        Opts::new(
            "coursefind_search_rejected_total",
            "Search requests rejected for a missing or invalid query"
        )
    ).expect("Failed to create SEARCH_REJECTED counter");

    /// Requests that failed because the catalog is malformed
    pub static ref CORPUS_ERRORS: Counter = Counter::with_opts(
        Opts::new(
            "coursefind_corpus_errors_total",
            "Search requests failed due to malformed course data"
        )
    ).expect("Failed to create CORPUS_ERRORS counter");

    /// Search request latency in seconds
    pub static ref SEARCH_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "coursefind_search_latency_seconds",
            "Search request latency in seconds"
        ).buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1])
    ).expect("Failed to create SEARCH_LATENCY histogram");

    /// Number of search results returned per request
    pub static ref SEARCH_RESULTS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "coursefind_search_results_count",
            "Number of search results returned per request"
        ).buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0])
    ).expect("Failed to create SEARCH_RESULTS histogram");

    // ============================================================================
    // Catalog metrics
    // ============================================================================

    /// Number of records in the loaded catalog
    pub static ref CORPUS_RECORDS: Gauge = Gauge::with_opts(
        Opts::new(
            "coursefind_corpus_records",
            "Number of records in the loaded course catalog"
        )
    ).expect("Failed to create CORPUS_RECORDS gauge");
}

static REGISTER: Once = Once::new();

/// Register all metrics with the global registry
///
/// Safe to call more than once; only the first call registers.
/// Panics if metrics registration fails.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        REGISTRY
            .register(Box::new(SEARCH_REQUESTS.clone()))
            .expect("Failed to register SEARCH_REQUESTS");
        REGISTRY
            .register(Box::new(SEARCH_REJECTED.clone()))
            .expect("Failed to register SEARCH_REJECTED");
        REGISTRY
            .register(Box::new(CORPUS_ERRORS.clone()))
            .expect("Failed to register CORPUS_ERRORS");
        REGISTRY
            .register(Box::new(SEARCH_LATENCY.clone()))
            .expect("Failed to register SEARCH_LATENCY");
        REGISTRY
            .register(Box::new(SEARCH_RESULTS.clone()))
            .expect("Failed to register SEARCH_RESULTS");
        REGISTRY
            .register(Box::new(CORPUS_RECORDS.clone()))
            .expect("Failed to register CORPUS_RECORDS");
    });
}

/// Gather all metrics and encode them in Prometheus text format
///
/// Returns an empty string if encoding fails.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Metrics contained invalid UTF-8: {}", e);
        String::new()
    })
}
