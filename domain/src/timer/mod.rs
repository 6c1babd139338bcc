//! Countdown timers, independent of the voting core

pub mod countdown;

pub use countdown::{Countdown, EventTimers, TickOutcome, Urgency, UrgencyThresholds, format_clock};
