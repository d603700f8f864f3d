//! Relevance ranking over the course catalog.
//!
//! This module contains:
//! - `scoring` - Per-field substring weights for a single record
//! - `engine` - Filtering, stable ordering and truncation over the corpus

pub mod engine;
pub mod scoring;

// Re-export commonly used types
pub use engine::{rank, RankingEngine, SearchError, DEFAULT_MAX_RESULTS};
pub use scoring::score_record;
