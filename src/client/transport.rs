//! Network access for the search session.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::corpus::Record;

/// Why a search request produced no results.
///
/// The `Display` text is what the user sees in the alert region.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("Could not reach the search server: {0}")]
    Network(String),

    #[error("Search failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Search failed: {0}")]
    Server(String),

    #[error("Unexpected response from the search server: {0}")]
    Decode(String),
}

/// Sends one query and returns the ranked records.
#[async_trait]
pub trait SearchTransport: Send + Sync + 'static {
    async fn search(&self, query: &str) -> Result<Vec<Record>, TransportError>;
}

/// [`SearchTransport`] over HTTP against `GET /api/search`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for `query`.
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/api/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn search(&self, query: &str) -> Result<Vec<Record>, TransportError> {
        let url = self.search_url(query);
        debug!(url = %url, "Sending search request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.json::<Value>().await.ok();

        interpret_response(status, body)
    }
}

/// Turn a status and (possibly unparsable) JSON body into records or an error.
///
/// A body carrying an `error` field is a failure even with a success status.
pub fn interpret_response(
    status: StatusCode,
    body: Option<Value>,
) -> Result<Vec<Record>, TransportError> {
    let error_message = body
        .as_ref()
        .and_then(|b| b.get("error"))
        .map(|e| match e.as_str() {
            Some(s) => s.to_string(),
            None => e.to_string(),
        });

    if !status.is_success() {
        let message = error_message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
        return Err(TransportError::Status {
            status: status.as_u16(),
            message,
        });
    }

    if let Some(message) = error_message {
        return Err(TransportError::Server(message));
    }

    let body = body.ok_or_else(|| TransportError::Decode("body is not JSON".to_string()))?;
    serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string()))
}
