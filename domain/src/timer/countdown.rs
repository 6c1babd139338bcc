//! Countdown timers for agenda events
//!
//! Pure state: something else decides when a second has passed and calls
//! [`Countdown::tick`]. Nothing here knows about voting or motions.

use crate::agenda::entities::{AgendaEvent, EventKind};
use serde::{Deserialize, Serialize};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused; nothing changed
    Idle,
    Running { remaining: u32 },
    /// Reached zero on this tick; reported exactly once
    Expired,
}

/// How close a countdown is to running out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Warning,
    Danger,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Warning => "warning",
            Urgency::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentages of the initial time at which urgency escalates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyThresholds {
    pub warning_percent: u8,
    pub danger_percent: u8,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            warning_percent: 25,
            danger_percent: 10,
        }
    }
}

impl UrgencyThresholds {
    pub fn classify(&self, remaining: u32, initial: u32) -> Urgency {
        if initial == 0 {
            return Urgency::Normal;
        }
        // remaining / initial <= percent / 100, in integers
        let scaled = u64::from(remaining) * 100;
        let initial = u64::from(initial);
        if scaled <= initial * u64::from(self.danger_percent) {
            Urgency::Danger
        } else if scaled <= initial * u64::from(self.warning_percent) {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    initial: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            initial: seconds,
            remaining: seconds,
            running: false,
        }
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Start counting; returns false when there is no time left
    pub fn start(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.running = true;
        true
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stop and restore the initial time
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.initial;
    }

    /// Replace both initial and remaining time, stopping the countdown
    pub fn set(&mut self, seconds: u32) {
        self.initial = seconds;
        self.reset();
    }

    /// Advance one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining: self.remaining,
            }
        }
    }

    pub fn urgency(&self, thresholds: &UrgencyThresholds) -> Urgency {
        thresholds.classify(self.remaining, self.initial)
    }
}

/// `MM:SS`, with hours only when needed
pub fn format_clock(seconds: u32) -> String {
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// The countdowns an agenda event needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTimers {
    pub total: Option<Countdown>,
    /// Per-speaker clock for moderated caucuses and speeches
    pub speaker: Option<Countdown>,
}

impl EventTimers {
    pub fn for_event(event: &AgendaEvent) -> Self {
        match &event.kind {
            EventKind::Moderated {
                total_time,
                speaker_time,
            }
            | EventKind::Speeches {
                total_time,
                speaker_time,
                ..
            } => Self {
                total: Some(Countdown::new(*total_time)),
                speaker: Some(Countdown::new(*speaker_time)),
            },
            EventKind::Unmoderated { duration } => Self {
                total: Some(Countdown::new(*duration)),
                speaker: None,
            },
            EventKind::General | EventKind::Voting => Self {
                total: event.timer.filter(|t| *t > 0).map(Countdown::new),
                speaker: None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.speaker.is_none()
    }

    pub fn any_running(&self) -> bool {
        self.total.as_ref().is_some_and(Countdown::is_running)
            || self.speaker.as_ref().is_some_and(Countdown::is_running)
    }

    /// Tick every countdown, returning (total, speaker) outcomes
    pub fn tick(&mut self) -> (TickOutcome, TickOutcome) {
        let total = self.total.as_mut().map_or(TickOutcome::Idle, Countdown::tick);
        let speaker = self.speaker.as_mut().map_or(TickOutcome::Idle, Countdown::tick);
        (total, speaker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::entities::EventDraft;
    use crate::core::ids::EventId;

    // ==================== Countdown ====================

    #[test]
    fn test_tick_only_when_running() {
        let mut countdown = Countdown::new(3);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert!(countdown.start());
        assert_eq!(countdown.tick(), TickOutcome::Running { remaining: 2 });
        countdown.pause();
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.remaining(), 2);
    }

    #[test]
    fn test_expires_once() {
        let mut countdown = Countdown::new(2);
        countdown.start();
        countdown.tick();
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert!(!countdown.start());
    }

    #[test]
    fn test_reset_and_set() {
        let mut countdown = Countdown::new(60);
        countdown.start();
        countdown.tick();
        countdown.reset();
        assert_eq!(countdown.remaining(), 60);
        assert!(!countdown.is_running());

        countdown.set(90);
        assert_eq!(countdown.initial(), 90);
        assert_eq!(countdown.remaining(), 90);
    }

    #[test]
    fn test_urgency_thresholds() {
        let thresholds = UrgencyThresholds::default();
        assert_eq!(thresholds.classify(100, 100), Urgency::Normal);
        assert_eq!(thresholds.classify(26, 100), Urgency::Normal);
        assert_eq!(thresholds.classify(25, 100), Urgency::Warning);
        assert_eq!(thresholds.classify(11, 100), Urgency::Warning);
        assert_eq!(thresholds.classify(10, 100), Urgency::Danger);
        assert_eq!(thresholds.classify(0, 100), Urgency::Danger);
        assert_eq!(thresholds.classify(0, 0), Urgency::Normal);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(3_725), "1:02:05");
    }

    // ==================== EventTimers ====================

    fn event(kind: EventKind, timer: Option<u32>) -> AgendaEvent {
        let mut draft = EventDraft::new(kind, "Event", "");
        draft.timer = timer;
        AgendaEvent::from_draft(EventId(1), draft)
    }

    #[test]
    fn test_timers_for_moderated() {
        let timers = EventTimers::for_event(&event(
            EventKind::Moderated {
                total_time: 600,
                speaker_time: 60,
            },
            None,
        ));
        assert_eq!(timers.total.unwrap().initial(), 600);
        assert_eq!(timers.speaker.unwrap().initial(), 60);
    }

    #[test]
    fn test_timers_for_unmoderated() {
        let timers = EventTimers::for_event(&event(EventKind::Unmoderated { duration: 300 }, None));
        assert_eq!(timers.total.unwrap().initial(), 300);
        assert!(timers.speaker.is_none());
    }

    #[test]
    fn test_timers_for_general() {
        assert!(EventTimers::for_event(&event(EventKind::General, None)).is_empty());
        assert!(EventTimers::for_event(&event(EventKind::General, Some(0))).is_empty());
        let timers = EventTimers::for_event(&event(EventKind::Voting, Some(120)));
        assert_eq!(timers.total.unwrap().initial(), 120);
    }

    #[test]
    fn test_event_timers_tick_together() {
        let mut timers = EventTimers::for_event(&event(
            EventKind::Speeches {
                speech_subject: None,
                total_time: 10,
                speaker_time: 1,
            },
            None,
        ));
        timers.total.as_mut().unwrap().start();
        timers.speaker.as_mut().unwrap().start();
        assert!(timers.any_running());

        let (total, speaker) = timers.tick();
        assert_eq!(total, TickOutcome::Running { remaining: 9 });
        assert_eq!(speaker, TickOutcome::Expired);
    }
}
