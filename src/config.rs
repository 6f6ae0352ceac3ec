//! Fetch configuration
//!
//! The endpoint comes from the environment (required); the loop parameters
//! have defaults that can be overridden per run via environment variables
//! or CLI flags. Pacing constants live here next to the values they bound.

use std::time::Duration;

/// Environment variable holding the base endpoint URL (required).
pub const ENDPOINT_ENV: &str = "API_ENDPOINT";

/// Environment variable overriding the total record target.
pub const TOTAL_ENV: &str = "FETCH_TOTAL";

/// Environment variable overriding the per-page batch size.
pub const BATCH_SIZE_ENV: &str = "FETCH_BATCH_SIZE";

/// Environment variable overriding the inter-request delay (milliseconds).
pub const DELAY_ENV: &str = "FETCH_DELAY_MS";

/// Default number of records to collect.
pub const DEFAULT_TOTAL_TARGET: usize = 1000;

/// Default number of records requested per page.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default pause between successful page requests.
/// 1 second keeps the request rate well under typical API limits without
/// stretching a full run beyond a few minutes.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Recovery delay after a failed page request, in milliseconds.
/// Deliberately longer than the inter-request delay so transient outages
/// get room to clear before the next offset is attempted. The failed
/// offset itself is never re-requested.
pub const ERROR_BACKOFF_MS: u64 = 5000;

/// Configuration for one download run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base endpoint URL; the offset is appended as a query parameter.
    pub endpoint: String,
    /// Desired final record count. The collected result is truncated to
    /// this length after the last page.
    pub total_target: usize,
    /// Records requested per page. Must be greater than zero.
    pub batch_size: usize,
    /// Pause between successful page requests.
    pub delay: Duration,
}

/// Optional per-invocation overrides of the environment configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Endpoint URL, taking precedence over `API_ENDPOINT`.
    pub endpoint: Option<String>,
    /// Total record target.
    pub total_target: Option<usize>,
    /// Per-page batch size.
    pub batch_size: Option<usize>,
    /// Inter-request delay.
    pub delay: Option<Duration>,
}

impl FetchConfig {
    /// Create a configuration, validating the batch size.
    pub fn new(
        endpoint: impl Into<String>,
        total_target: usize,
        batch_size: usize,
        delay: Duration,
    ) -> Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: BATCH_SIZE_ENV.to_string(),
                value: "0".to_string(),
            });
        }
        Ok(Self {
            endpoint: endpoint.into(),
            total_target,
            batch_size,
            delay,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Fails fast if `API_ENDPOINT` is absent or empty, or if a numeric
    /// override does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(Overrides::default())
    }

    /// Build the effective configuration from CLI overrides layered on top
    /// of the environment.
    pub fn resolve(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::resolve_from(overrides, |key| std::env::var(key).ok())
    }

    fn resolve_from(
        overrides: Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let endpoint = overrides
            .endpoint
            .or_else(|| lookup(ENDPOINT_ENV))
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;

        let total_target = match overrides.total_target {
            Some(v) => v,
            None => parse_var(&lookup, TOTAL_ENV, DEFAULT_TOTAL_TARGET)?,
        };
        let batch_size = match overrides.batch_size {
            Some(v) => v,
            None => parse_var(&lookup, BATCH_SIZE_ENV, DEFAULT_BATCH_SIZE)?,
        };
        let delay = match overrides.delay {
            Some(v) => v,
            None => Duration::from_millis(parse_var(&lookup, DELAY_ENV, DEFAULT_DELAY_MS)?),
        };

        Self::new(endpoint, total_target, batch_size, delay)
    }

    /// Number of page requests needed to reach the target.
    pub fn num_pages(&self) -> usize {
        self.total_target.div_ceil(self.batch_size)
    }

    /// Fixed recovery delay applied after a failed page request.
    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(ERROR_BACKOFF_MS)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The required endpoint URL is not configured
    #[error("missing endpoint URL: set {ENDPOINT_ENV} or pass --endpoint")]
    MissingEndpoint,

    /// A configuration value failed validation or parsing
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// The offending configuration key
        key: String,
        /// The rejected raw value
        value: String,
    },
}
