//! Configuration file loading for mun-chair
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./mun-chair.toml` or `./.mun-chair.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/mun-chair/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileOutputConfig, FileOutputFormat, FileReplConfig, FileSessionConfig,
    FileTimerConfig, FileVotingConfig,
};
pub use loader::ConfigLoader;
