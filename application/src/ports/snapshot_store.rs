//! Persistence port for session snapshots
//!
//! The session calls [`SnapshotStore::save`] after every change that should
//! survive a restart. The storage medium is up to the adapter.

use mun_domain::{DomainError, SessionSnapshot};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by snapshot store adapters
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write snapshot: {0}")]
    Write(String),

    #[error("Failed to read snapshot: {0}")]
    Read(String),

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(String),

    /// The stored snapshot exists but does not pass import validation
    #[error("Stored snapshot is invalid: {0}")]
    Invalid(#[from] DomainError),
}

pub trait SnapshotStore: Send + Sync {
    /// Durably store the snapshot, replacing any previous one
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError>;

    /// Load the stored snapshot; `None` when nothing was stored yet
    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError>;

    /// Write an extra, timestamped copy into `dir` and return its path
    fn export_copy(&self, _snapshot: &SessionSnapshot, _dir: &Path) -> Result<PathBuf, StoreError> {
        Err(StoreError::Write(format!(
            "{} does not support exports",
            self.describe()
        )))
    }

    /// Human-readable location, for messages
    fn describe(&self) -> String {
        "snapshot store".to_string()
    }
}

/// Store that keeps nothing (`--no-save`, one-shot commands, tests)
pub struct NoSnapshotStore;

impl SnapshotStore for NoSnapshotStore {
    fn save(&self, _snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        Ok(None)
    }

    fn describe(&self) -> String {
        "nowhere (persistence disabled)".to_string()
    }
}
