//! File-backed snapshot persistence
//!
//! Provides [`JsonFileSnapshotStore`], the [`SnapshotStore`](mun_application::SnapshotStore)
//! adapter that keeps the session in a single pretty-printed JSON file.

mod error;
mod json_file;

pub use error::SnapshotFileError;
pub use json_file::{EXPORT_PREFIX, JsonFileSnapshotStore, export_file_name};
