//! JSON envelope writer
//!
//! Assembles all collected records into a single timestamped envelope and
//! writes it as the final output artifact, replacing any prior content.

use super::{OutputError, OutputResult};
use crate::UserRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// The consolidated output artifact: all collected records plus metadata.
/// Created once per run, immutable after write.
#[derive(Debug, Serialize)]
pub struct UserDataEnvelope {
    /// Number of records in `users`.
    pub total_users: usize,
    /// Generation time, ISO-8601 / RFC 3339 in UTC.
    pub timestamp: String,
    /// The collected records, in fetch order.
    pub users: Vec<UserRecord>,
}

impl UserDataEnvelope {
    /// Build an envelope stamped with the current wall-clock time.
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self::with_timestamp(users, Utc::now())
    }

    /// Build an envelope with an explicit generation time.
    pub fn with_timestamp(users: Vec<UserRecord>, generated_at: DateTime<Utc>) -> Self {
        Self {
            total_users: users.len(),
            timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            users,
        }
    }
}

/// Write the envelope for `records` to `path`, overwriting prior content.
///
/// No error recovery: a write failure propagates to the caller.
pub fn save(records: Vec<UserRecord>, path: &Path) -> OutputResult<()> {
    let envelope = UserDataEnvelope::new(records);

    let json = serde_json::to_string_pretty(&envelope)
        .map_err(|e| OutputError::Serialization(e.to_string()))?;

    std::fs::write(path, json).map_err(|e| OutputError::Io(e.to_string()))?;

    info!(
        path = %path.display(),
        total_users = envelope.total_users,
        "User data saved"
    );

    Ok(())
}
