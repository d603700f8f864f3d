use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::{validate_records, CorpusError, CorpusSource, Record};

/// A corpus decoded from a JSON document.
///
/// The document is checked once when the corpus is built. A structurally
/// invalid document does not prevent construction: the failure is kept and
/// returned from every [`CorpusSource::records`] call, so callers see an
/// internal error instead of partial data.
#[derive(Debug, Clone)]
pub struct JsonCorpus {
    outcome: Result<Arc<[Record]>, CorpusError>,
}

impl JsonCorpus {
    /// Build a corpus from an already parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        let outcome: Result<Arc<[Record]>, CorpusError> = decode(value).map(Arc::from);

        match &outcome {
            Ok(records) => info!(records = records.len(), "Course catalog loaded"),
            Err(e) => warn!(error = %e, "Course catalog is malformed"),
        }

        Self { outcome }
    }

    /// Read and parse a JSON catalog file.
    ///
    /// Fails only if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read course catalog {:?}", path))?;

        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse course catalog {:?}", path))?;

        Ok(Self::from_value(value))
    }

    /// Number of usable records (0 when the catalog is malformed).
    pub fn len(&self) -> usize {
        self.outcome.as_ref().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CorpusSource for JsonCorpus {
    fn records(&self) -> Result<Arc<[Record]>, CorpusError> {
        self.outcome.clone()
    }
}

fn decode(value: Value) -> Result<Vec<Record>, CorpusError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CorpusError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Record>(item).map_err(|e| CorpusError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    validate_records(&records)?;
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
