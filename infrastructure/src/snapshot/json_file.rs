//! JSON file snapshot store
//!
//! Saves are atomic: the snapshot is written to `<file>.tmp` and renamed
//! over the target, so a crash mid-write leaves the previous snapshot intact.

use super::error::SnapshotFileError;
use chrono::{DateTime, Local};
use mun_application::{SnapshotStore, StoreError};
use mun_domain::SessionSnapshot;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name prefix of timestamped exports
pub const EXPORT_PREFIX: &str = "mun-timer";

/// Export file name for the given moment, e.g. `mun-timer_2026-03-01_14-05-09.json`
pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("{}_{}.json", EXPORT_PREFIX, at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Snapshot store backed by one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a copy of the snapshot to a timestamped file in `dir`
    ///
    /// Returns the path of the written file.
    pub fn export_timestamped(
        snapshot: &SessionSnapshot,
        dir: &Path,
    ) -> Result<PathBuf, SnapshotFileError> {
        let path = dir.join(export_file_name(Local::now()));
        write_snapshot(&path, snapshot)?;
        Ok(path)
    }

    /// Read and validate a snapshot file that is not the session's own
    pub fn read_file(path: &Path) -> Result<SessionSnapshot, StoreError> {
        let text = fs::read_to_string(path).map_err(|source| SnapshotFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(SessionSnapshot::from_json(&text)?)
    }
}

fn write_snapshot(path: &Path, snapshot: &SessionSnapshot) -> Result<(), SnapshotFileError> {
    let json = snapshot.to_json_pretty()?;
    let write_err = |source| SnapshotFileError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    write_atomic(path, json.as_bytes()).map_err(write_err)?;
    debug!("Wrote snapshot: {}", path.display());
    Ok(())
}

/// The temporary file never outlives a failed write
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = tmp_path(path);
    let result = write_synced(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        write_snapshot(&self.path, snapshot).map_err(StoreError::from)
    }

    fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        if !self.path.exists() {
            debug!("No snapshot at {}", self.path.display());
            return Ok(None);
        }
        Self::read_file(&self.path).map(Some)
    }

    fn export_copy(&self, snapshot: &SessionSnapshot, dir: &Path) -> Result<PathBuf, StoreError> {
        Self::export_timestamped(snapshot, dir).map_err(StoreError::from)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
