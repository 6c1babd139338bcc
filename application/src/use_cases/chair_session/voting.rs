//! Plenary voting on the session: rule configuration and per-event results

use super::{ChairSession, SessionError};
use crate::ports::clock::Clock;
use crate::ports::snapshot_store::SnapshotStore;
use mun_domain::{
    Ballot, DelegateCode, DomainError, EntityKind, EventId, MajorityMode, MajorityRuleConfig,
    SaveOutcome, SecurityCouncilConfig, Verdict, VoteKind, VotingSessionRecord, evaluate,
};
use tracing::{debug, info};

impl<S: SnapshotStore + 'static, C: Clock + 'static> ChairSession<S, C> {
    pub fn voting_config(&self) -> &MajorityRuleConfig {
        &self.voting
    }

    /// Fresh ballot in the shape the current mode expects
    pub fn empty_ballot(&self) -> Ballot {
        Ballot::empty_for(&self.voting)
    }

    /// Evaluate a plenary ballot under the current configuration
    ///
    /// The verdict is attributed to the current event when it is a voting
    /// event.
    pub fn evaluate_plenary(&self, ballot: &Ballot) -> Result<Verdict, SessionError> {
        let verdict = evaluate(&self.voting, ballot)?;
        debug!("Plenary ballot evaluated: {}", verdict);

        let event_id = self
            .agenda
            .current()
            .filter(|e| e.kind.is_voting())
            .map(|e| e.id);
        self.notifier.on_verdict(event_id, &verdict);
        Ok(verdict)
    }

    /// Store the ballot of a voting event, persisting only real changes
    pub fn save_voting_result(
        &mut self,
        event_id: EventId,
        ballot: Ballot,
    ) -> Result<SaveOutcome, SessionError> {
        let event = self
            .agenda
            .get(event_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Event, event_id))?;
        if !event.kind.is_voting() {
            return Err(DomainError::validation(format!(
                "Event {} ({}) is not a voting event",
                event_id,
                event.kind.name()
            ))
            .into());
        }
        ballot.validate(&self.voting)?;

        let record = VotingSessionRecord::under(&self.voting, ballot, self.now());
        let outcome = self.results.save(event_id, record.clone());
        match outcome {
            SaveOutcome::Changed => {
                info!("Voting result for event {} saved", event_id);
                self.autosave();
            }
            SaveOutcome::Unchanged => {
                debug!("Voting result for event {} unchanged; not saved", event_id)
            }
        }
        self.notifier.on_voting_saved(event_id, &record, outcome);
        Ok(outcome)
    }

    pub fn voting_result(&self, event_id: EventId) -> Option<&VotingSessionRecord> {
        self.results.load(event_id)
    }

    /// Reopen a saved result, restoring the mode and vote kind it was taken under
    pub fn resume_voting(&mut self, event_id: EventId) -> Option<VotingSessionRecord> {
        let record = self.results.load(event_id)?.clone();
        self.voting.mode = record.mode;
        self.voting.vote_kind = record.vote_kind;
        debug!("Resumed voting on event {} under {}", event_id, record.mode);
        Some(record)
    }

    pub fn set_majority_mode(&mut self, mode: MajorityMode) {
        if self.voting.mode != mode {
            self.voting.mode = mode;
            info!("Majority mode set to {}", mode);
            self.autosave();
        }
    }

    pub fn set_vote_kind(&mut self, kind: VoteKind) {
        if self.voting.vote_kind != kind {
            self.voting.vote_kind = kind;
            info!("Vote type set to {}", kind);
            self.autosave();
        }
    }

    /// Replace the Security Council seating
    ///
    /// Duplicate members are dropped and permanent members that are not
    /// seated lose their veto.
    pub fn configure_security_council(
        &mut self,
        members: Vec<DelegateCode>,
        permanent_members: Vec<DelegateCode>,
        required_yes: u32,
    ) -> Result<&SecurityCouncilConfig, SessionError> {
        if required_yes < 1 {
            return Err(DomainError::validation("Required yes votes must be at least 1").into());
        }
        if members.is_empty() {
            return Err(DomainError::validation("Security Council needs at least one member").into());
        }

        let mut council = SecurityCouncilConfig {
            members,
            permanent_members,
            required_yes,
        };
        council.normalize();
        info!(
            "Security Council configured: {} members, {} permanent, {} yes required",
            council.members.len(),
            council.permanent_members.len(),
            council.required_yes
        );
        self.voting.security_council = council;
        self.autosave();
        Ok(&self.voting.security_council)
    }
}
