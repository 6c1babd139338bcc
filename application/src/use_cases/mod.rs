//! Use cases (application services)
//!
//! Use cases orchestrate the domain logic and coordinate with external
//! systems through ports.

pub mod chair_session;
