//! Per-event voting results with change detection
//!
//! A save that does not change anything reports [`SaveOutcome::Unchanged`]
//! so callers can skip the (expensive) snapshot write.

use super::record::VotingSessionRecord;
use crate::core::ids::EventId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Changed,
    Unchanged,
}

impl SaveOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, SaveOutcome::Changed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VotingSessionStore {
    records: BTreeMap<EventId, VotingSessionRecord>,
}

impl VotingSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: BTreeMap<EventId, VotingSessionRecord>) -> Self {
        Self { records }
    }

    /// Store `record` unless it matches what is already there
    ///
    /// Without a previous record, an untouched ballot (all zero counts, or
    /// every member at the default choice) is not worth storing.
    pub fn save(&mut self, event_id: EventId, record: VotingSessionRecord) -> SaveOutcome {
        let changed = match self.records.get(&event_id) {
            Some(previous) => !previous.same_content(&record),
            None => record.has_entered_votes(),
        };
        if changed {
            self.records.insert(event_id, record);
            SaveOutcome::Changed
        } else {
            SaveOutcome::Unchanged
        }
    }

    pub fn load(&self, event_id: EventId) -> Option<&VotingSessionRecord> {
        self.records.get(&event_id)
    }

    /// Drop records whose event no longer exists
    pub fn retain_events(&mut self, mut keep: impl FnMut(EventId) -> bool) {
        self.records.retain(|id, _| keep(*id));
    }

    pub fn records(&self) -> &BTreeMap<EventId, VotingSessionRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::{
        Ballot, BallotCounts, MajorityMode, MemberBallot, MemberChoice, SecurityCouncilConfig,
        VoteKind,
    };

    fn counts(for_votes: u32, against: u32, abstain: u32, saved_at: u64) -> VotingSessionRecord {
        VotingSessionRecord::new(
            MajorityMode::Simple,
            VoteKind::Substantive,
            Ballot::Counts(BallotCounts::new(for_votes, against, abstain)),
            saved_at,
        )
    }

    #[test]
    fn test_first_save_with_votes_is_changed() {
        let mut store = VotingSessionStore::new();
        assert_eq!(store.save(EventId(4), counts(10, 2, 1, 1)), SaveOutcome::Changed);
        assert_eq!(store.load(EventId(4)).unwrap().saved_at, 1);
    }

    #[test]
    fn test_first_save_of_empty_ballot_is_unchanged() {
        let mut store = VotingSessionStore::new();
        assert_eq!(store.save(EventId(4), counts(0, 0, 0, 1)), SaveOutcome::Unchanged);
        assert!(store.load(EventId(4)).is_none());
    }

    #[test]
    fn test_identical_save_ignores_timestamp() {
        let mut store = VotingSessionStore::new();
        store.save(EventId(4), counts(10, 2, 1, 1));
        assert_eq!(store.save(EventId(4), counts(10, 2, 1, 99)), SaveOutcome::Unchanged);
        assert_eq!(store.load(EventId(4)).unwrap().saved_at, 1);
    }

    #[test]
    fn test_different_counts_overwrite() {
        let mut store = VotingSessionStore::new();
        store.save(EventId(4), counts(10, 2, 1, 1));
        assert!(store.save(EventId(4), counts(10, 3, 1, 2)).is_changed());
        assert_eq!(
            store.load(EventId(4)).unwrap().ballot,
            Ballot::Counts(BallotCounts::new(10, 3, 1))
        );
    }

    #[test]
    fn test_mode_change_is_changed() {
        let mut store = VotingSessionStore::new();
        store.save(EventId(4), counts(10, 2, 1, 1));
        let mut record = counts(10, 2, 1, 2);
        record.mode = MajorityMode::TwoThirds;
        assert!(store.save(EventId(4), record).is_changed());
    }

    #[test]
    fn test_member_ballot_defaults_are_untouched() {
        let council = SecurityCouncilConfig::default();
        let mut store = VotingSessionStore::new();

        let procedural = VotingSessionRecord::new(
            MajorityMode::SecurityCouncil,
            VoteKind::Procedural,
            Ballot::Members(MemberBallot::default_for(&council, VoteKind::Procedural)),
            1,
        );
        assert!(!store.save(EventId(1), procedural).is_changed());

        let ballot = MemberBallot::default_for(&council, VoteKind::Substantive)
            .with("FRA", MemberChoice::Yes);
        let substantive = VotingSessionRecord::new(
            MajorityMode::SecurityCouncil,
            VoteKind::Substantive,
            Ballot::Members(ballot),
            1,
        );
        assert!(store.save(EventId(1), substantive).is_changed());
    }

    #[test]
    fn test_retain_events() {
        let mut store = VotingSessionStore::new();
        store.save(EventId(1), counts(1, 0, 0, 0));
        store.save(EventId(2), counts(1, 0, 0, 0));
        store.retain_events(|id| id == EventId(2));
        assert_eq!(store.len(), 1);
        assert!(store.load(EventId(1)).is_none());
    }
}
