//! In-process transport for tests and offline use.
//!
//! Ranks a local record list with the same engine the server uses, and can
//! simulate per-query latency or a failing server.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::transport::{SearchTransport, TransportError};
use crate::corpus::Record;
use crate::search::{rank, DEFAULT_MAX_RESULTS};

pub struct MockTransport {
    records: Arc<[Record]>,
    delays: HashMap<String, Duration>,
    failure: Option<TransportError>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
            delays: HashMap::new(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Delay responses for `query` by `delay`.
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    /// Fail every request with `error`.
    pub fn failing(mut self, error: TransportError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Queries received so far, in dispatch order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchTransport for MockTransport {
    async fn search(&self, query: &str) -> Result<Vec<Record>, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.to_string());
        }

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(rank(&self.records, query, DEFAULT_MAX_RESULTS)),
        }
    }
}
