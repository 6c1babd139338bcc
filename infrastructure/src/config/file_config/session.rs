//! Session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};

/// Raw session configuration from TOML
///
/// # Example
///
/// ```toml
/// [session]
/// snapshot = "mun-session.json"   # autosave target, also loaded at startup
/// autosave = true
/// journal = "mun-journal.jsonl"   # optional JSONL session journal
/// export_dir = "exports"          # where `export` writes timestamped copies
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Snapshot file loaded at startup and written on autosave
    pub snapshot: String,
    /// Save after every persistent change
    pub autosave: bool,
    /// Optional JSONL journal of session events
    pub journal: Option<String>,
    /// Directory for timestamped exports (current directory when unset)
    pub export_dir: Option<String>,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            snapshot: "mun-session.json".to_string(),
            autosave: true,
            journal: None,
            export_dir: None,
        }
    }
}
