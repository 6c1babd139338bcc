//! Application-level configuration.
//!
//! - [`SessionParams`]: persistence behavior of the chair session

pub mod session_params;

pub use session_params::SessionParams;
