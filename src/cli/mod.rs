//! CLI command implementations

use crate::checkpoint::CheckpointStore;
use crate::config::{ConfigError, FetchConfig, Overrides};
use crate::fetcher::{BatchFetcher, HttpPageFetcher};
use crate::output;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Bulk paginated user-record downloader.
///
/// Fetches records page by page from the configured endpoint, writes one
/// checkpoint file per batch, and produces a single aggregated JSON
/// artifact at the end.
#[derive(Debug, Parser)]
#[command(name = "user-data-downloader", version, about)]
pub struct Cli {
    /// Base endpoint URL; overrides the API_ENDPOINT environment variable
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Total number of records to collect
    #[arg(long)]
    pub total: Option<usize>,

    /// Records requested per page
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause between successful page requests, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Directory for per-batch checkpoint files
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: PathBuf,

    /// Path of the final aggregated output file
    #[arg(long, default_value = "user_data.json")]
    pub output: PathBuf,
}

impl Cli {
    /// Resolve the effective fetch configuration (flags override environment).
    pub fn fetch_config(&self) -> Result<FetchConfig, ConfigError> {
        FetchConfig::resolve(Overrides {
            endpoint: self.endpoint.clone(),
            total_target: self.total,
            batch_size: self.batch_size,
            delay: self.delay_ms.map(Duration::from_millis),
        })
    }
}

/// Execute the download: fetch all pages, then write the aggregated output.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.fetch_config()?;

    info!(
        endpoint = %config.endpoint,
        target = config.total_target,
        batch_size = config.batch_size,
        "Starting download"
    );

    let fetcher = HttpPageFetcher::new(reqwest::Client::new(), config.endpoint.clone());
    let checkpoints = CheckpointStore::new(&cli.checkpoint_dir);

    let records = BatchFetcher::new(config)
        .fetch_all(&fetcher, &checkpoints)
        .await?;

    output::save(records, &cli.output)?;

    Ok(())
}
