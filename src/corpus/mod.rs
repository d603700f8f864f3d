//! Course catalog records and the read-only corpus they live in.
//!
//! The ranking engine never loads data itself. It receives a
//! [`CorpusSource`], which hands out the same immutable, ordered record
//! slice for the lifetime of the process.

mod json;

pub use json::JsonCorpus;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// A single course in the catalog.
///
/// Text fields that are absent or `null` in the source data are empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier
    pub id: i64,
    /// Course title
    #[serde(default, deserialize_with = "nullable_text")]
    pub title: String,
    /// Free-text course description
    #[serde(default, deserialize_with = "nullable_text")]
    pub description: String,
    /// Category label
    #[serde(default, deserialize_with = "nullable_text")]
    pub category: String,
    /// Price, never negative
    pub price: f64,
    /// Instructor name
    #[serde(default, deserialize_with = "nullable_text")]
    pub instructor: String,
}

fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Structural problems with the catalog data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorpusError {
    #[error("Course data is not a list of records (found {found})")]
    NotAnArray { found: &'static str },

    #[error("Record at position {index} is malformed: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Record {id} has an invalid price: {price}")]
    InvalidPrice { id: i64, price: f64 },

    #[error("Record id {id} appears more than once")]
    DuplicateId { id: i64 },
}

/// Read-only access to the course catalog.
///
/// Implementations must return the same records, in the same order, on
/// every call.
pub trait CorpusSource: Send + Sync {
    /// The full ordered catalog, or the reason it cannot be used.
    fn records(&self) -> Result<Arc<[Record]>, CorpusError>;
}

/// A corpus held directly in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCorpus {
    records: Arc<[Record]>,
}

impl InMemoryCorpus {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CorpusSource for InMemoryCorpus {
    fn records(&self) -> Result<Arc<[Record]>, CorpusError> {
        Ok(Arc::clone(&self.records))
    }
}

/// Check the invariants typed deserialization cannot express.
pub fn validate_records(records: &[Record]) -> Result<(), CorpusError> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        if !record.price.is_finite() || record.price < 0.0 {
            return Err(CorpusError::InvalidPrice {
                id: record.id,
                price: record.price,
            });
        }
        if !seen.insert(record.id) {
            return Err(CorpusError::DuplicateId { id: record.id });
        }
    }

    Ok(())
}
