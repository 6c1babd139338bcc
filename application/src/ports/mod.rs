//! Port definitions (interfaces for external adapters)
//!
//! Ports define the boundaries between the application and the outside
//! world. Adapters in the infrastructure and presentation layers implement
//! them.

pub mod clock;
pub mod composite_notifier;
pub mod session_notifier;
pub mod snapshot_store;
