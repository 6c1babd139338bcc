//! Presentation layer for mun-chair
//!
//! This crate contains CLI definitions, output formatters, the countdown
//! driver and the interactive chair shell.

pub mod cli;
pub mod config;
pub mod output;
pub mod repl;
pub mod timer;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, TallyArgs};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::notifier::ConsoleNotifier;
pub use repl::{ChairRepl, ChairShell, Reply, ReplCommand};
pub use timer::{SharedTimers, TimerDriver, TimerSink, TimerSlot};
