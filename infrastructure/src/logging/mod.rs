//! Logging infrastructure: the structured session journal.
//!
//! Provides [`JsonlSessionJournal`], a JSONL file writer that implements
//! the [`SessionNotifier`](mun_application::SessionNotifier) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSessionJournal;
