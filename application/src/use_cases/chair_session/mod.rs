//! Chair session use case
//!
//! [`ChairSession`] is the single owner of all mutable session state: the
//! agenda, the plenary voting configuration and results, and the motion
//! queue with its resolution workflow. Every operation is a method on it;
//! there is no ambient state.
//!
//! ```text
//! ChairSession
//! ├── agenda / topics / delegates / chair   (agenda.rs)
//! ├── voting config + VotingSessionStore    (voting.rs)
//! ├── MotionQueue + MotionWorkflow          (motions.rs)
//! └── snapshot import / export / autosave   (snapshot.rs)
//! ```
//!
//! The session is not synchronized. One chair drives it; callers that want
//! to share it across tasks must put it behind a single lock or actor.

mod agenda;
mod motions;
mod snapshot;
mod voting;

use crate::config::SessionParams;
use crate::ports::clock::Clock;
use crate::ports::session_notifier::{NoSessionNotifier, SessionNotifier};
use crate::ports::snapshot_store::{SnapshotStore, StoreError};
use mun_domain::{
    Agenda, Chair, Delegate, DomainError, MajorityRuleConfig, MotionQueue, MotionWorkflow,
    SessionSnapshot, SpeechesDefaults, TopicList, VotingSessionStore,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during session operations
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Persistence error: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Domain error behind this failure, if any
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            SessionError::Domain(e) => Some(e),
            SessionError::Store(_) => None,
        }
    }
}

pub struct ChairSession<S: SnapshotStore + 'static, C: Clock + 'static> {
    store: Arc<S>,
    clock: Arc<C>,
    notifier: Arc<dyn SessionNotifier>,
    params: SessionParams,

    agenda: Agenda,
    topics: TopicList,
    delegates: Vec<Delegate>,
    chair: Chair,
    speeches_defaults: SpeechesDefaults,

    voting: MajorityRuleConfig,
    results: VotingSessionStore,

    queue: MotionQueue,
    workflow: MotionWorkflow,
}

impl<S: SnapshotStore + 'static, C: Clock + 'static> ChairSession<S, C> {
    /// Start a session from a validated snapshot
    ///
    /// The first event (if any) becomes current; the motion queue starts
    /// empty.
    pub fn new(snapshot: SessionSnapshot, store: Arc<S>, clock: Arc<C>) -> Self {
        let mut session = Self {
            store,
            clock,
            notifier: Arc::new(NoSessionNotifier),
            params: SessionParams::default(),
            agenda: Agenda::default(),
            topics: TopicList::default(),
            delegates: Vec::new(),
            chair: Chair::default(),
            speeches_defaults: SpeechesDefaults::default(),
            voting: MajorityRuleConfig::default(),
            results: VotingSessionStore::new(),
            queue: MotionQueue::new(),
            workflow: MotionWorkflow::new(),
        };
        session.adopt(snapshot);
        session
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn SessionNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn now(&self) -> u64 {
        self.clock.now_millis()
    }

    /// Save after a persistent change if autosave is on
    ///
    /// Failures are reported but never undo the change that triggered them.
    fn autosave(&self) {
        if !self.params.autosave {
            return;
        }
        if let Err(e) = self.store.save(&self.export_snapshot()) {
            tracing::warn!("Autosave to {} failed: {}", self.store.describe(), e);
            self.notifier.on_autosave_failed(&e);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ports::clock::FixedClock;
    use mun_domain::{AgendaEvent, EventDraft, EventId, EventKind, SessionSnapshot, TopicId};
    use std::sync::Mutex;

    /// In-memory store counting saves
    #[derive(Default)]
    pub struct MemoryStore {
        pub saved: Mutex<Vec<SessionSnapshot>>,
        pub fail: std::sync::atomic::AtomicBool,
    }

    impl MemoryStore {
        pub fn save_count(&self) -> usize {
            self.saved.lock().unwrap().len()
        }

        pub fn last(&self) -> Option<SessionSnapshot> {
            self.saved.lock().unwrap().last().cloned()
        }
    }

    impl SnapshotStore for MemoryStore {
        fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(StoreError::Write("disk full".into()));
            }
            self.saved.lock().unwrap().push(snapshot.clone());
            Ok(())
        }

        fn load(&self) -> Result<Option<SessionSnapshot>, StoreError> {
            Ok(self.last())
        }
    }

    pub fn sample_snapshot() -> SessionSnapshot {
        let event = |id: u64, kind: EventKind, title: &str, topic: Option<u64>| {
            AgendaEvent::from_draft(
                EventId(id),
                EventDraft::new(kind, title, "").with_topic(topic.map(TopicId)),
            )
        };
        SessionSnapshot::new(
            vec![mun_domain::Topic {
                id: TopicId(1),
                title: "Climate Finance".into(),
            }],
            vec![
                event(1, EventKind::General, "Opening Session", None),
                event(
                    2,
                    EventKind::Moderated {
                        total_time: 600,
                        speaker_time: 60,
                    },
                    "Moderated Caucus",
                    Some(1),
                ),
                event(3, EventKind::Voting, "Voting Procedure", Some(1)),
                event(4, EventKind::General, "Closing Remarks", None),
            ],
            vec![
                mun_domain::Delegate {
                    id: mun_domain::DelegateId(1),
                    code: "USA".into(),
                    name: "United States".into(),
                },
                mun_domain::Delegate {
                    id: mun_domain::DelegateId(2),
                    code: "FRA".into(),
                    name: "France".into(),
                },
            ],
            Chair {
                name: "Alex".into(),
            },
        )
    }

    pub type TestSession = ChairSession<MemoryStore, FixedClock>;

    pub fn session() -> (TestSession, Arc<MemoryStore>, Arc<FixedClock>) {
        let store = Arc::new(MemoryStore::default());
        let clock = Arc::new(FixedClock::new(1_000));
        let session = ChairSession::new(sample_snapshot(), store.clone(), clock.clone());
        (session, store, clock)
    }
}
