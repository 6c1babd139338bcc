//! Tokio task that ticks the current event's countdowns once per second
//!
//! ```text
//! interval(1s) ──▶ EventTimers::tick() ──▶ TimerSink::on_expired(slot)
//!        ▲
//!        └── stops when the CancellationToken fires
//! ```
//!
//! The driver only sees the shared [`EventTimers`]; the chair shell swaps
//! them when the current event changes.

use mun_domain::{EventTimers, TickOutcome};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Countdowns shared between the shell and the driver
pub type SharedTimers = Arc<Mutex<EventTimers>>;

/// Which countdown of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSlot {
    Total,
    Speaker,
}

impl TimerSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerSlot::Total => "total",
            TimerSlot::Speaker => "speaker",
        }
    }
}

impl std::fmt::Display for TimerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives countdown expirations
pub trait TimerSink: Send + Sync {
    fn on_expired(&self, slot: TimerSlot);
}

pub struct TimerDriver {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TimerDriver {
    /// Spawn the ticking task on the current runtime
    pub fn spawn(timers: SharedTimers, sink: Arc<dyn TimerSink>) -> Self {
        let period = Duration::from_secs(1);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let (total, speaker) = match timers.lock() {
                            Ok(mut timers) => timers.tick(),
                            Err(_) => break,
                        };
                        for (slot, outcome) in [(TimerSlot::Total, total), (TimerSlot::Speaker, speaker)] {
                            if outcome == TickOutcome::Expired {
                                debug!("{} timer expired", slot);
                                sink.on_expired(slot);
                            }
                        }
                    }
                }
            }
            debug!("Timer driver stopped");
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Stop ticking and wait for the task to finish
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
