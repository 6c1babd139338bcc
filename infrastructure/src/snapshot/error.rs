//! Snapshot file error types

use mun_application::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotFileError {
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<SnapshotFileError> for StoreError {
    fn from(err: SnapshotFileError) -> Self {
        match err {
            SnapshotFileError::Write { .. } => StoreError::Write(err.to_string()),
            SnapshotFileError::Read { .. } => StoreError::Read(err.to_string()),
            SnapshotFileError::Serialize(_) => StoreError::Serialize(err.to_string()),
        }
    }
}
