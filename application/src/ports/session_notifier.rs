//! Notification port for session observers
//!
//! Purely observational: implementations render or record what happened
//! but never feed anything back into the session. Every callback has a
//! no-op default so observers only implement what they care about.

use crate::ports::snapshot_store::StoreError;
use mun_domain::{
    AgendaEvent, EventId, QueuedMotion, Resolution, SaveOutcome, Verdict, VotingSessionRecord,
};

pub trait SessionNotifier: Send + Sync {
    /// A plenary ballot was evaluated
    fn on_verdict(&self, _event_id: Option<EventId>, _verdict: &Verdict) {}

    /// The motion queue changed; `ordered` is in floor priority order
    fn on_queue_changed(&self, _ordered: &[QueuedMotion]) {}

    /// A motion vote was finalized
    fn on_motion_resolved(&self, _resolution: &Resolution) {}

    /// An event was added to the agenda (by the chair or by a passed motion)
    fn on_event_appended(&self, _event: &AgendaEvent) {}

    /// A plenary voting result was saved
    fn on_voting_saved(
        &self,
        _event_id: EventId,
        _record: &VotingSessionRecord,
        _outcome: SaveOutcome,
    ) {
    }

    /// Autosave failed; in-memory state is kept
    fn on_autosave_failed(&self, _error: &StoreError) {}
}

/// No-op notifier for when nobody is listening
pub struct NoSessionNotifier;

impl SessionNotifier for NoSessionNotifier {}
