//! Composite notifier: delegates to multiple notifiers.
//!
//! Used to fan out session events to both the console and the JSONL
//! session journal.
//!
//! ```text
//! ChairSession ──▶ CompositeSessionNotifier
//!                         │
//!          ┌──────────────┴───────────────┐
//!          ▼                              ▼
//!   ConsoleNotifier                JsonlSessionJournal
//! ```

use super::session_notifier::SessionNotifier;
use super::snapshot_store::StoreError;
use mun_domain::{
    AgendaEvent, EventId, QueuedMotion, Resolution, SaveOutcome, Verdict, VotingSessionRecord,
};
use std::sync::Arc;

#[derive(Default)]
pub struct CompositeSessionNotifier {
    delegates: Vec<Arc<dyn SessionNotifier>>,
}

impl CompositeSessionNotifier {
    pub fn new(delegates: Vec<Arc<dyn SessionNotifier>>) -> Self {
        Self { delegates }
    }

    pub fn with(mut self, notifier: Arc<dyn SessionNotifier>) -> Self {
        self.delegates.push(notifier);
        self
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

/// Macro to delegate a method call to all inner notifiers.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl SessionNotifier for CompositeSessionNotifier {
    fn on_verdict(&self, event_id: Option<EventId>, verdict: &Verdict) {
        delegate!(self, on_verdict, event_id, verdict);
    }

    fn on_queue_changed(&self, ordered: &[QueuedMotion]) {
        delegate!(self, on_queue_changed, ordered);
    }

    fn on_motion_resolved(&self, resolution: &Resolution) {
        delegate!(self, on_motion_resolved, resolution);
    }

    fn on_event_appended(&self, event: &AgendaEvent) {
        delegate!(self, on_event_appended, event);
    }

    fn on_voting_saved(
        &self,
        event_id: EventId,
        record: &VotingSessionRecord,
        outcome: SaveOutcome,
    ) {
        delegate!(self, on_voting_saved, event_id, record, outcome);
    }

    fn on_autosave_failed(&self, error: &StoreError) {
        delegate!(self, on_autosave_failed, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mun_domain::{BallotCounts, VoteOutcome};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<&'static str>>);

    impl SessionNotifier for Recorder {
        fn on_verdict(&self, _event_id: Option<EventId>, _verdict: &Verdict) {
            self.0.lock().unwrap().push("verdict");
        }

        fn on_queue_changed(&self, _ordered: &[QueuedMotion]) {
            self.0.lock().unwrap().push("queue");
        }
    }

    #[test]
    fn test_fans_out_to_every_delegate() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let composite = CompositeSessionNotifier::default()
            .with(first.clone())
            .with(second.clone());
        assert_eq!(composite.len(), 2);

        let verdict = Verdict::new(VoteOutcome::Passed, BallotCounts::new(3, 1, 0));
        composite.on_verdict(None, &verdict);
        composite.on_queue_changed(&[]);
        // defaults are no-ops
        composite.on_autosave_failed(&StoreError::Write("disk full".into()));

        assert_eq!(*first.0.lock().unwrap(), vec!["verdict", "queue"]);
        assert_eq!(*second.0.lock().unwrap(), vec!["verdict", "queue"]);
    }
}
