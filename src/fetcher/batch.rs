//! Batch-fetch control loop
//!
//! Drives offset-based pagination against a [`PageFetcher`]: each page is
//! classified into a [`PageOutcome`], a pure decision function maps the
//! outcome to a [`PageAction`], and the loop applies the action. Pacing is
//! carried as data on the action so the policy is testable without
//! wall-clock waits.
//!
//! Failed offsets are skipped, never re-requested: a page that errors is
//! logged, the fixed recovery delay is waited out, and pagination moves to
//! the next offset. The failed page's records are permanently absent from
//! the result.

use crate::checkpoint::CheckpointStore;
use crate::config::FetchConfig;
use crate::fetcher::{FetcherError, FetcherResult, PageFetcher};
use crate::UserRecord;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Outcome of a single page request.
#[derive(Debug)]
pub enum PageOutcome {
    /// The body was a JSON array of records.
    Batch(Vec<UserRecord>),
    /// The body decoded but is not a record array.
    Malformed,
    /// The request itself failed.
    Failed(FetcherError),
}

impl PageOutcome {
    /// Classify a decoded response body.
    ///
    /// Only an array whose elements are all JSON objects counts as a
    /// batch; anything else (an error object, a bare string, an array of
    /// scalars) is a malformed page.
    pub fn classify(body: Value) -> Self {
        match body {
            Value::Array(items) => {
                let mut records = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(map) => records.push(map),
                        _ => return PageOutcome::Malformed,
                    }
                }
                PageOutcome::Batch(records)
            }
            _ => PageOutcome::Malformed,
        }
    }
}

/// What the loop does after a page, decided from the outcome alone.
#[derive(Debug)]
pub enum PageAction {
    /// Checkpoint and accumulate the batch, then pause before the next
    /// page. `pause` is `None` once the target is met: the loop stops
    /// instead of sleeping.
    Commit {
        /// The records to accumulate and checkpoint.
        batch: Vec<UserRecord>,
        /// Inter-request pause, or `None` when this batch is terminal.
        pause: Option<Duration>,
    },
    /// Drop the page and move straight to the next offset (no checkpoint,
    /// no pause).
    Skip,
    /// Wait out the recovery delay, then move to the next offset. The
    /// failed offset is not retried.
    Backoff {
        /// The error that failed the page.
        error: FetcherError,
        /// Fixed recovery delay, longer than the inter-request pause.
        pause: Duration,
    },
}

/// Decision table for the per-page policy.
///
/// `collected_len` is the accumulator length before this page's records
/// are appended.
pub fn decide(outcome: PageOutcome, collected_len: usize, config: &FetchConfig) -> PageAction {
    match outcome {
        PageOutcome::Batch(batch) => {
            let pause = if collected_len + batch.len() >= config.total_target {
                None
            } else {
                Some(config.delay)
            };
            PageAction::Commit { batch, pause }
        }
        PageOutcome::Malformed => PageAction::Skip,
        PageOutcome::Failed(error) => PageAction::Backoff {
            error,
            pause: config.error_backoff(),
        },
    }
}

/// Sequential batch fetcher driving offset pagination.
pub struct BatchFetcher {
    config: FetchConfig,
}

impl BatchFetcher {
    /// Create a fetcher for one run.
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// The configuration this fetcher runs with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Run the full pagination loop and return the collected records.
    ///
    /// The result is the ordered concatenation of all committed batches,
    /// truncated to `total_target`. Per-page failures are contained here;
    /// only checkpoint write failures propagate.
    pub async fn fetch_all<F>(
        &self,
        fetcher: &F,
        checkpoints: &CheckpointStore,
    ) -> FetcherResult<Vec<UserRecord>>
    where
        F: PageFetcher + ?Sized,
    {
        let config = &self.config;
        let num_pages = config.num_pages();
        let mut collected: Vec<UserRecord> = Vec::with_capacity(config.total_target);

        debug!(
            target = config.total_target,
            batch_size = config.batch_size,
            num_pages,
            "Starting pagination"
        );

        for page in 0..num_pages {
            let offset = page * config.batch_size;

            let outcome = match fetcher.fetch_page(offset, config.batch_size).await {
                Ok(body) => PageOutcome::classify(body),
                Err(e) => PageOutcome::Failed(e),
            };

            match decide(outcome, collected.len(), config) {
                PageAction::Commit { batch, pause } => {
                    checkpoints.write_batch(offset, &batch)?;
                    collected.extend(batch);
                    info!(
                        offset,
                        collected = collected.len(),
                        target = config.total_target,
                        "Fetched batch"
                    );
                    match pause {
                        Some(delay) => sleep(delay).await,
                        None => break,
                    }
                }
                PageAction::Skip => {
                    warn!(offset, "Response is not a record array, skipping page");
                }
                PageAction::Backoff { error, pause } => {
                    error!(offset, %error, "Page request failed, skipping to next offset");
                    sleep(pause).await;
                }
            }
        }

        collected.truncate(config.total_target);
        Ok(collected)
    }
}
