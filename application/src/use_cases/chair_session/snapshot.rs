//! Snapshot export, import and explicit persistence

use super::{ChairSession, SessionError};
use crate::ports::clock::Clock;
use crate::ports::snapshot_store::SnapshotStore;
use mun_domain::{Agenda, MotionWorkflow, SessionSnapshot, TopicList, VotingSessionStore};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl<S: SnapshotStore + 'static, C: Clock + 'static> ChairSession<S, C> {
    /// Full persistable state
    ///
    /// The motion queue is transient and not part of the snapshot.
    pub fn export_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            topics: self.topics.topics().to_vec(),
            events: self.agenda.events().to_vec(),
            delegates: self.delegates.clone(),
            chair: self.chair.clone(),
            voting_config: self.voting.clone(),
            speeches_defaults: self.speeches_defaults,
            voting_results: self.results.records().clone(),
        }
    }

    /// Replace the whole session with an imported snapshot
    ///
    /// The text is fully validated first; on error nothing changes. Pending
    /// motions and any vote in progress are discarded.
    pub fn import_snapshot(&mut self, json: &str) -> Result<(), SessionError> {
        let snapshot = SessionSnapshot::from_json(json)?;
        let dropped = self.queue.len();
        self.adopt(snapshot);
        info!(
            "Snapshot imported: {} events, {} topics ({} queued motions discarded)",
            self.agenda.len(),
            self.topics.topics().len(),
            dropped
        );
        self.autosave();
        Ok(())
    }

    /// Save now, regardless of the autosave setting
    pub fn persist(&self) -> Result<(), SessionError> {
        self.store.save(&self.export_snapshot())?;
        info!("Snapshot saved to {}", self.store.describe());
        Ok(())
    }

    /// Write a timestamped copy of the session into `dir`
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        let path = self.store.export_copy(&self.export_snapshot(), dir)?;
        info!("Snapshot exported to {}", path.display());
        Ok(path)
    }

    pub(super) fn adopt(&mut self, snapshot: SessionSnapshot) {
        let SessionSnapshot {
            topics,
            events,
            delegates,
            chair,
            voting_config,
            speeches_defaults,
            voting_results,
        } = snapshot;

        let agenda = Agenda::new(events);
        let mut results = VotingSessionStore::from_records(voting_results);
        let before = results.len();
        results.retain_events(|id| agenda.get(id).is_some());
        if results.len() < before {
            warn!(
                "Dropped {} voting results for events that no longer exist",
                before - results.len()
            );
        }

        self.agenda = agenda;
        self.topics = TopicList::new(topics);
        self.delegates = delegates;
        self.chair = chair;
        self.voting = voting_config;
        self.speeches_defaults = speeches_defaults;
        self.results = results;
        // Queue ids keep counting so ids shown before the import stay unique
        self.queue.clear();
        self.workflow = MotionWorkflow::new();
    }
}
