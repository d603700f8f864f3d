//! Application state for the web server.
//!
//! This module defines the shared state that is accessible from all request handlers.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::search::RankingEngine;

/// Shared application state for the web server.
///
/// Cloned for each request handler; the engine and its corpus are shared
/// behind `Arc`s and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// The ranking engine over the loaded catalog
    pub engine: Arc<RankingEngine>,
    /// `Cache-Control` value for successful search responses
    pub cache_control: Arc<str>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(engine: Arc<RankingEngine>, search: &SearchConfig) -> Self {
        Self {
            engine,
            cache_control: search.cache_control().into(),
        }
    }
}
