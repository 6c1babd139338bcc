//! Wall-clock driver for agenda countdowns

mod driver;

pub use driver::{SharedTimers, TimerDriver, TimerSink, TimerSlot};
