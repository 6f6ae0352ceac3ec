//! Per-batch checkpoint persistence
//!
//! Every successfully fetched page is snapshotted to `<dir>/<offset>.json`
//! before the loop advances, so partial progress can be inspected mid-run
//! or after a crash. Checkpoints are keyed by offset and written at most
//! once per run; they are not read back (no resume).

use crate::UserRecord;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stateless writer for per-offset batch snapshots.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory checkpoints are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the checkpoint file for a given offset.
    pub fn path_for(&self, offset: usize) -> PathBuf {
        self.dir.join(format!("{offset}.json"))
    }

    /// Persist one batch verbatim at `<dir>/<offset>.json`, pretty-printed.
    ///
    /// The batch is written untrimmed: the final-result truncation happens
    /// only after the last page, never here.
    ///
    /// Uses a temp file in the target directory plus an atomic rename, so a
    /// crash mid-write cannot leave a torn checkpoint behind.
    pub fn write_batch(
        &self,
        offset: usize,
        batch: &[UserRecord],
    ) -> Result<PathBuf, CheckpointError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| CheckpointError::Io(format!("failed to create {:?}: {e}", self.dir)))?;

        let json = serde_json::to_string_pretty(batch)
            .map_err(|e| CheckpointError::Serialization(e.to_string()))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| CheckpointError::Io(format!("failed to create temp file: {e}")))?;
        temp_file
            .write_all(json.as_bytes())
            .map_err(|e| CheckpointError::Io(format!("failed to write checkpoint: {e}")))?;
        temp_file
            .flush()
            .map_err(|e| CheckpointError::Io(format!("failed to flush checkpoint: {e}")))?;

        let path = self.path_for(offset);
        temp_file
            .persist(&path)
            .map_err(|e| CheckpointError::Io(format!("failed to persist checkpoint: {e}")))?;

        debug!(
            path = %path.display(),
            records = batch.len(),
            "Checkpoint written"
        );

        Ok(path)
    }
}

/// Errors related to checkpoint persistence
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}
