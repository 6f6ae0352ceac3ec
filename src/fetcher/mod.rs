//! Paginated data fetching

use async_trait::async_trait;
use serde_json::Value;

pub mod batch;
pub mod http;

pub use batch::BatchFetcher;
pub use http::HttpPageFetcher;

/// Fetcher errors
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// HTTP request error (non-success status)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Network error (timeout, connection refused)
    #[error("network error: {0}")]
    Network(String),

    /// Response body decode error
    #[error("decode error: {0}")]
    Decode(String),

    /// Checkpoint write failure; terminates the run
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] crate::checkpoint::CheckpointError),
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// One page request at a given offset.
///
/// This is the seam between the batch-fetch loop and the network: tests
/// drive the loop with scripted implementations, production uses
/// [`HttpPageFetcher`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page starting at `offset`, returning the decoded JSON body.
    ///
    /// The body is returned undecoded beyond JSON itself; the loop decides
    /// whether it is a usable record batch.
    async fn fetch_page(&self, offset: usize, limit: usize) -> FetcherResult<Value>;
}
