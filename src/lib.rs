//! # User Data Downloader Library
//!
//! A small library and CLI for bulk retrieval of user records from a
//! paginated HTTP API, with per-batch checkpointing and a single
//! consolidated output artifact.
//!
//! ## Features
//!
//! - **Offset Pagination**: Sequential page requests driven by a single
//!   batch-fetch loop with an explicit per-page decision policy
//! - **Checkpointing**: Every successful batch is snapshotted to its own
//!   file before the loop advances, so partial progress survives a crash
//! - **Rate Limiting**: Configurable pause between successful requests and
//!   a fixed longer recovery delay after failures
//! - **Schema-Less Records**: Records are passed through as open field
//!   maps; the upstream schema is never validated
//!
//! ## Quick Start
//!
//! ```no_run
//! use user_data_downloader::checkpoint::CheckpointStore;
//! use user_data_downloader::fetcher::{BatchFetcher, HttpPageFetcher};
//! use user_data_downloader::{output, FetchConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetchConfig::from_env()?;
//! let fetcher = HttpPageFetcher::new(reqwest::Client::new(), config.endpoint.clone());
//! let checkpoints = CheckpointStore::new("checkpoints");
//!
//! let records = BatchFetcher::new(config).fetch_all(&fetcher, &checkpoints).await?;
//! output::save(records, "user_data.json".as_ref())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Environment/CLI configuration and pacing constants
//! - [`fetcher`] - Page fetching over HTTP and the batch-fetch loop
//! - [`checkpoint`] - Per-offset batch snapshots
//! - [`output`] - Final aggregated envelope writer
//! - [`cli`] - Command-line entry points

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Per-batch checkpoint persistence
pub mod checkpoint;

/// CLI command implementations
pub mod cli;

/// Runtime configuration
pub mod config;

/// Paginated data fetching
pub mod fetcher;

/// Final output writers
pub mod output;

// Re-export commonly used types
pub use config::FetchConfig;

/// A single user record as returned by the API.
///
/// The upstream schema is unknown to this tool, so records are kept as
/// open field maps and passed through untouched. Identity is positional
/// (order of arrival), not keyed.
pub type UserRecord = serde_json::Map<String, serde_json::Value>;
