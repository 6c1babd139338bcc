//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior, resolved by the
//! binary from the config file and command-line flags.

use mun_domain::{OutputFormat, UrgencyThresholds};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// When countdowns turn yellow and red
    pub thresholds: UrgencyThresholds,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            thresholds: UrgencyThresholds::default(),
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Ask before cancelling a motion vote
    pub confirm_cancel: bool,
    /// Path to history file
    pub history_file: Option<PathBuf>,
    /// Directory for `export`
    pub export_dir: PathBuf,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            confirm_cancel: true,
            history_file: None,
            export_dir: PathBuf::from("."),
        }
    }
}

impl ReplConfig {
    /// History file location, falling back to the platform data directory
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("mun-chair").join("history.txt")))
    }
}
