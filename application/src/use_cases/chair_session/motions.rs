//! Floor motions on the session: queue management and resolution

use super::{ChairSession, SessionError};
use crate::ports::clock::Clock;
use crate::ports::snapshot_store::SnapshotStore;
use mun_domain::{
    BallotCounts, DomainError, EntityKind, MotionId, MotionParameters, OrderedView, QueueId,
    QueuedMotion, Resolution, WorkflowState,
};
use tracing::{debug, info};

impl<S: SnapshotStore + 'static, C: Clock + 'static> ChairSession<S, C> {
    pub fn ordered_motions(&self) -> OrderedView<'_> {
        self.queue.ordered_view()
    }

    pub fn floor_state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    /// Queue a motion after checking its parameters
    pub fn submit_motion(
        &mut self,
        motion_id: MotionId,
        parameters: MotionParameters,
    ) -> Result<QueueId, SessionError> {
        if let Some(topic) = parameters.topic
            && !self.topics.contains(topic)
        {
            return Err(DomainError::not_found(EntityKind::Topic, topic).into());
        }

        let queue_id = self.queue.submit(motion_id, parameters, self.now())?;
        info!("Motion {} submitted as {}", motion_id, queue_id);
        self.notify_queue();
        Ok(queue_id)
    }

    /// Withdraw a queued motion; returns whether it was still queued
    ///
    /// The motion currently being voted on must be cancelled instead.
    pub fn withdraw_motion(&mut self, queue_id: QueueId) -> Result<bool, SessionError> {
        if self
            .workflow
            .active_motion()
            .is_some_and(|m| m.queue_id == queue_id)
        {
            return Err(DomainError::InvalidState {
                operation: "withdraw the motion on the floor",
                state: self.workflow.state().name(),
            }
            .into());
        }

        let withdrawn = self.queue.withdraw(queue_id);
        if withdrawn {
            info!("Motion {} withdrawn", queue_id);
            self.notify_queue();
        } else {
            debug!("Motion {} was not queued; nothing to withdraw", queue_id);
        }
        Ok(withdrawn)
    }

    /// Drop every queued motion, abandoning a vote in progress
    pub fn clear_motions(&mut self) -> usize {
        if let Ok(abandoned) = self.workflow.cancel(&mut self.queue) {
            info!("Vote on {} abandoned by clearing the queue", abandoned.queue_id);
        }
        let dropped = self.queue.clear();
        info!("Motion queue cleared ({} dropped)", dropped);
        self.notify_queue();
        dropped
    }

    /// Put a queued motion to a vote
    pub fn begin_voting(&mut self, queue_id: QueueId) -> Result<QueuedMotion, SessionError> {
        let motion = self.workflow.begin_voting(&self.queue, queue_id)?.clone();
        info!("Voting opened on {} ({})", queue_id, motion.motion_id);
        Ok(motion)
    }

    /// Replace the working ballot with raw yes/no/abstain counts
    pub fn record_floor_ballot(
        &mut self,
        yes: i64,
        no: i64,
        abstain: i64,
    ) -> Result<BallotCounts, SessionError> {
        let counts = BallotCounts::from_raw(yes, no, abstain)?;
        self.workflow.record_ballot(counts)?;
        debug!("Floor ballot recorded: {}/{}/{}", yes, no, abstain);
        Ok(counts)
    }

    /// Resolve the motion on the floor
    pub fn finalize_motion(&mut self) -> Result<Resolution, SessionError> {
        let resolution = self.workflow.finalize(&mut self.queue, &mut self.agenda)?;
        info!(
            "Motion {} ({}) {}: {} yes / {} no, {} required",
            resolution.motion.queue_id,
            resolution.motion.motion_id,
            resolution.outcome,
            resolution.tally.for_votes,
            resolution.tally.against,
            resolution.required
        );

        if let Some(event) = resolution.created_event.and_then(|id| self.agenda.get(id)) {
            self.notifier.on_event_appended(event);
        }
        self.notifier.on_motion_resolved(&resolution);
        self.notify_queue();

        if resolution.created_event.is_some() {
            self.autosave();
        }
        Ok(resolution)
    }

    /// Abandon the vote and withdraw the motion on the floor
    ///
    /// Confirmation is the caller's job.
    pub fn cancel_motion(&mut self) -> Result<QueuedMotion, SessionError> {
        let motion = self.workflow.cancel(&mut self.queue)?;
        info!("Vote on {} cancelled", motion.queue_id);
        self.notify_queue();
        Ok(motion)
    }

    fn notify_queue(&self) {
        let ordered = self.queue.ordered_view().to_vec();
        self.notifier.on_queue_changed(&ordered);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::session;
    use super::*;
    use mun_domain::{EventKind, TopicId, VoteOutcome};

    fn moderated(speaker: u32) -> MotionParameters {
        MotionParameters::new()
            .with_total_time(600)
            .with_speaker_time(speaker)
            .with_topic(TopicId(1))
    }

    // ==================== Queue ====================

    #[test]
    fn test_submit_uses_clock_and_orders_queue() {
        let (mut session, _, clock) = session();
        let caucus = session.submit_motion(MotionId::ModeratedCaucus, moderated(60)).unwrap();
        clock.advance(500);
        let suspend = session
            .submit_motion(MotionId::SuspendMeeting, MotionParameters::new().with_timer(300))
            .unwrap();

        let ordered: Vec<_> = session.ordered_motions().iter().map(|m| m.queue_id).collect();
        assert_eq!(ordered, vec![suspend, caucus]);
        assert_eq!(session.ordered_motions().first().unwrap().submitted_at, 1_500);
    }

    #[test]
    fn test_submit_rejects_unknown_topic() {
        let (mut session, _, _) = session();
        let err = session
            .submit_motion(MotionId::CloseDebate, MotionParameters::new().with_topic(TopicId(9)))
            .unwrap_err();
        assert!(err.domain().is_some_and(DomainError::is_not_found));
        assert!(session.ordered_motions().is_empty());
    }

    #[test]
    fn test_withdraw_twice() {
        let (mut session, _, _) = session();
        let id = session.submit_motion(MotionId::SetAgenda, MotionParameters::new()).unwrap();
        assert!(session.withdraw_motion(id).unwrap());
        assert!(!session.withdraw_motion(id).unwrap());
    }

    #[test]
    fn test_withdraw_motion_on_floor_is_invalid() {
        let (mut session, _, _) = session();
        let id = session.submit_motion(MotionId::SetAgenda, MotionParameters::new()).unwrap();
        session.begin_voting(id).unwrap();
        let err = session.withdraw_motion(id).unwrap_err();
        assert!(err.domain().is_some_and(DomainError::is_invalid_state));
    }

    #[test]
    fn test_clear_abandons_vote() {
        let (mut session, _, _) = session();
        let id = session.submit_motion(MotionId::SetAgenda, MotionParameters::new()).unwrap();
        session.submit_motion(MotionId::CloseDebate, MotionParameters::new()).unwrap();
        session.begin_voting(id).unwrap();

        assert_eq!(session.clear_motions(), 1);
        assert!(session.floor_state().is_idle());
        assert!(session.ordered_motions().is_empty());
    }

    // ==================== Resolution ====================

    #[test]
    fn test_passed_motion_appends_event_and_autosaves() {
        let (mut session, store, _) = session();
        let caucus = session.submit_motion(MotionId::ModeratedCaucus, moderated(45)).unwrap();
        session.submit_motion(MotionId::ExtendTime, MotionParameters::new().with_timer(30)).unwrap();

        session.begin_voting(caucus).unwrap();
        session.record_floor_ballot(5, 4, 2).unwrap();
        let resolution = session.finalize_motion().unwrap();

        assert_eq!(resolution.outcome, VoteOutcome::Passed);
        assert_eq!(resolution.discarded.len(), 1);
        assert!(session.ordered_motions().is_empty());

        let event = session.agenda().events().last().unwrap();
        assert_eq!(Some(event.id), resolution.created_event);
        assert!(matches!(event.kind, EventKind::Moderated { speaker_time: 45, .. }));
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.last().unwrap().events.len(), 5);
    }

    #[test]
    fn test_failed_motion_keeps_others_without_saving() {
        let (mut session, store, _) = session();
        let caucus = session.submit_motion(MotionId::ModeratedCaucus, moderated(45)).unwrap();
        let other = session.submit_motion(MotionId::SetAgenda, MotionParameters::new()).unwrap();

        session.begin_voting(caucus).unwrap();
        session.record_floor_ballot(4, 5, 0).unwrap();
        let resolution = session.finalize_motion().unwrap();

        assert_eq!(resolution.outcome, VoteOutcome::Failed);
        let remaining: Vec<_> = session.ordered_motions().iter().map(|m| m.queue_id).collect();
        assert_eq!(remaining, vec![other]);
        assert_eq!(session.agenda().len(), 4);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_negative_ballot_rejected() {
        let (mut session, _, _) = session();
        let id = session.submit_motion(MotionId::SetAgenda, MotionParameters::new()).unwrap();
        session.begin_voting(id).unwrap();
        let err = session.record_floor_ballot(3, -1, 0).unwrap_err();
        assert!(matches!(err.domain(), Some(DomainError::Validation(_))));
    }

    #[test]
    fn test_finalize_without_votes() {
        let (mut session, _, _) = session();
        let id = session.submit_motion(MotionId::SetAgenda, MotionParameters::new()).unwrap();
        session.begin_voting(id).unwrap();
        let err = session.finalize_motion().unwrap_err();
        assert!(matches!(err.domain(), Some(DomainError::NoVotesCast)));
        assert!(!session.floor_state().is_idle());
    }

    #[test]
    fn test_cancel_removes_motion() {
        let (mut session, _, _) = session();
        let id = session.submit_motion(MotionId::SetAgenda, MotionParameters::new()).unwrap();
        session.begin_voting(id).unwrap();
        assert_eq!(session.cancel_motion().unwrap().queue_id, id);
        assert!(session.ordered_motions().is_empty());
        assert!(session.cancel_motion().is_err());
    }
}
