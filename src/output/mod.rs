//! Final output writers

pub mod json;

pub use json::{save, UserDataEnvelope};

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
