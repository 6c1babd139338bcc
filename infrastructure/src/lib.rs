//! Infrastructure layer for mun-chair
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the JSON snapshot file, the JSONL session
//! journal, the system clock and configuration file loading.

pub mod clock;
pub mod config;
pub mod logging;
pub mod snapshot;

// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{
    ConfigLoader, FileConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
    FileSessionConfig, FileTimerConfig, FileVotingConfig,
};
pub use logging::JsonlSessionJournal;
pub use snapshot::{JsonFileSnapshotStore, SnapshotFileError, export_file_name};
