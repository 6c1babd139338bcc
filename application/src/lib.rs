//! Application layer for mun-chair
//!
//! This crate contains the chair session use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionParams;
pub use ports::{
    clock::{Clock, FixedClock},
    composite_notifier::CompositeSessionNotifier,
    session_notifier::{NoSessionNotifier, SessionNotifier},
    snapshot_store::{NoSnapshotStore, SnapshotStore, StoreError},
};
pub use use_cases::chair_session::{ChairSession, SessionError};
