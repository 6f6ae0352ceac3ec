//! HTTP page fetcher
//!
//! One GET per page against the configured endpoint, with the pagination
//! cursor appended as an `offset` query parameter.

use crate::fetcher::{FetcherError, FetcherResult, PageFetcher};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Fetches pages from a single endpoint over HTTP.
pub struct HttpPageFetcher {
    client: Client,
    endpoint: String,
}

impl HttpPageFetcher {
    /// Create a new fetcher.
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `endpoint` - Base request URL; `offset` and `limit` are appended
    ///   as query parameters per page
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, offset: usize, limit: usize) -> FetcherResult<Value> {
        debug!(endpoint = %self.endpoint, offset, limit, "Requesting page");

        let params = [
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| FetcherError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetcherError::Http(format!("unexpected status {status}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetcherError::Decode(e.to_string()))
    }
}
