//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: strongly typed identifiers (events, topics, delegates, queue entries)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
