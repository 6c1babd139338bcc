//! Motion resolution workflow
//!
//! ```text
//! Idle ──begin_voting──▶ AwaitingBallot ──finalize──▶ Idle
//!                         │  ▲    │
//!            record_ballot└──┘    └──cancel──▶ Idle
//! ```
//!
//! Motions always use the floor rule: yes must reach
//! `floor((yes + no) / 2) + 1`, independent of the plenary majority mode.

use super::queue::{MotionQueue, QueuedMotion};
use crate::agenda::timeline::Agenda;
use crate::core::error::{DomainError, EntityKind};
use crate::core::ids::{EventId, QueueId};
use crate::voting::{BallotCounts, VoteOutcome, floor_majority_required};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    AwaitingBallot {
        /// Snapshot taken when voting began
        motion: QueuedMotion,
        ballot: BallotCounts,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::AwaitingBallot { .. } => "awaiting ballot",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, WorkflowState::Idle)
    }
}

/// Outcome of a finalized motion vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub motion: QueuedMotion,
    pub outcome: VoteOutcome,
    pub tally: BallotCounts,
    pub required: u32,
    /// Event appended to the agenda when the motion passed
    pub created_event: Option<EventId>,
    /// Competing motions cleared because this one passed
    pub discarded: Vec<QueueId>,
}

impl Resolution {
    pub fn is_passed(&self) -> bool {
        self.outcome.is_passed()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MotionWorkflow {
    state: WorkflowState,
}

impl MotionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Motion currently on the floor, if any
    pub fn active_motion(&self) -> Option<&QueuedMotion> {
        match &self.state {
            WorkflowState::AwaitingBallot { motion, .. } => Some(motion),
            WorkflowState::Idle => None,
        }
    }

    /// Working ballot, if voting is in progress
    pub fn ballot(&self) -> Option<BallotCounts> {
        match &self.state {
            WorkflowState::AwaitingBallot { ballot, .. } => Some(*ballot),
            WorkflowState::Idle => None,
        }
    }

    /// Put a queued motion to a vote with an empty ballot
    pub fn begin_voting(
        &mut self,
        queue: &MotionQueue,
        queue_id: QueueId,
    ) -> Result<&QueuedMotion, DomainError> {
        if !self.state.is_idle() {
            return Err(self.invalid("begin voting"));
        }
        let motion = queue
            .get(queue_id)
            .ok_or_else(|| DomainError::not_found(EntityKind::QueuedMotion, queue_id))?;

        self.state = WorkflowState::AwaitingBallot {
            motion: motion.clone(),
            ballot: BallotCounts::default(),
        };
        self.active_motion()
            .ok_or_else(|| self.invalid("begin voting"))
    }

    /// Replace the working ballot
    pub fn record_ballot(&mut self, counts: BallotCounts) -> Result<(), DomainError> {
        match &mut self.state {
            WorkflowState::AwaitingBallot { ballot, .. } => {
                *ballot = counts;
                Ok(())
            }
            WorkflowState::Idle => Err(self.invalid("record a ballot")),
        }
    }

    /// Resolve the motion on the floor
    ///
    /// On pass the resulting event is appended to `agenda` and the whole
    /// queue is cleared. On failure only this motion leaves the queue. An
    /// all-zero yes/no ballot is rejected and voting stays open.
    pub fn finalize(
        &mut self,
        queue: &mut MotionQueue,
        agenda: &mut Agenda,
    ) -> Result<Resolution, DomainError> {
        let (motion, tally) = match &self.state {
            WorkflowState::AwaitingBallot { motion, ballot } => (motion, *ballot),
            WorkflowState::Idle => return Err(self.invalid("finalize")),
        };

        if tally.present_and_voting() == 0 {
            return Err(DomainError::NoVotesCast);
        }

        let required = floor_majority_required(tally.for_votes, tally.against);
        let passed = tally.for_votes >= required;

        queue.withdraw(motion.queue_id);
        let (outcome, created_event, discarded) = if passed {
            let draft = motion.motion().materialize(&motion.parameters);
            let event_id = agenda.append(draft);
            let discarded = queue.ids();
            queue.clear();
            (VoteOutcome::Passed, Some(event_id), discarded)
        } else {
            (VoteOutcome::Failed, None, Vec::new())
        };

        let motion = match std::mem::take(&mut self.state) {
            WorkflowState::AwaitingBallot { motion, .. } => motion,
            WorkflowState::Idle => return Err(self.invalid("finalize")),
        };

        Ok(Resolution {
            motion,
            outcome,
            tally,
            required,
            created_event,
            discarded,
        })
    }

    /// Abandon the vote and withdraw the motion from the queue
    pub fn cancel(&mut self, queue: &mut MotionQueue) -> Result<QueuedMotion, DomainError> {
        if self.state.is_idle() {
            return Err(self.invalid("cancel"));
        }
        match std::mem::take(&mut self.state) {
            WorkflowState::AwaitingBallot { motion, .. } => {
                queue.withdraw(motion.queue_id);
                Ok(motion)
            }
            WorkflowState::Idle => Err(self.invalid("cancel")),
        }
    }

    fn invalid(&self, operation: &'static str) -> DomainError {
        DomainError::InvalidState {
            operation,
            state: self.state.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::entities::{AgendaEvent, EventDraft, EventKind};
    use crate::core::ids::TopicId;
    use crate::motion::registry::{MotionId, MotionParameters};

    fn agenda_with_closing() -> Agenda {
        Agenda::new(vec![
            AgendaEvent::from_draft(
                EventId(1),
                EventDraft::new(EventKind::General, "Opening", "Welcome"),
            ),
            AgendaEvent::from_draft(
                EventId(2),
                EventDraft::new(EventKind::General, "Closing Ceremony", ""),
            ),
        ])
    }

    fn queue_with_three() -> (MotionQueue, QueueId, QueueId, QueueId) {
        let mut queue = MotionQueue::new();
        let caucus = queue
            .submit(
                MotionId::ModeratedCaucus,
                MotionParameters::new()
                    .with_total_time(600)
                    .with_speaker_time(60)
                    .with_topic(TopicId(1)),
                0,
            )
            .unwrap();
        let unmod = queue
            .submit(
                MotionId::UnmoderatedCaucus,
                MotionParameters::new().with_duration(300),
                1,
            )
            .unwrap();
        let agenda = queue
            .submit(MotionId::SetAgenda, MotionParameters::new(), 2)
            .unwrap();
        (queue, caucus, unmod, agenda)
    }

    // ==================== Finalize ====================

    #[test]
    fn test_finalize_pass_appends_event_and_clears_queue() {
        let (mut queue, caucus, unmod, set_agenda) = queue_with_three();
        let mut agenda = agenda_with_closing();
        let mut workflow = MotionWorkflow::new();

        workflow.begin_voting(&queue, caucus).unwrap();
        workflow.record_ballot(BallotCounts::new(5, 4, 3)).unwrap();
        let resolution = workflow.finalize(&mut queue, &mut agenda).unwrap();

        assert!(resolution.is_passed());
        assert_eq!(resolution.required, 5);
        assert_eq!(resolution.created_event, Some(EventId(3)));
        assert_eq!(resolution.discarded, vec![unmod, set_agenda]);
        assert!(queue.is_empty());
        assert!(workflow.state().is_idle());

        // motion events go to the end, after closing
        let last = agenda.events().last().unwrap();
        assert_eq!(last.id, EventId(3));
        assert_eq!(
            last.kind,
            EventKind::Moderated {
                total_time: 600,
                speaker_time: 60
            }
        );
        assert_eq!(last.topic_id, Some(TopicId(1)));
    }

    #[test]
    fn test_finalize_fail_removes_only_resolved_motion() {
        let (mut queue, caucus, unmod, set_agenda) = queue_with_three();
        let mut agenda = agenda_with_closing();
        let mut workflow = MotionWorkflow::new();

        workflow.begin_voting(&queue, caucus).unwrap();
        workflow.record_ballot(BallotCounts::new(4, 5, 0)).unwrap();
        let resolution = workflow.finalize(&mut queue, &mut agenda).unwrap();

        assert_eq!(resolution.outcome, VoteOutcome::Failed);
        assert_eq!(resolution.created_event, None);
        assert!(resolution.discarded.is_empty());
        assert_eq!(queue.ids(), vec![unmod, set_agenda]);
        assert_eq!(agenda.len(), 2);
        assert!(workflow.state().is_idle());
    }

    #[test]
    fn test_finalize_tie_fails() {
        let (mut queue, caucus, _, _) = queue_with_three();
        let mut agenda = agenda_with_closing();
        let mut workflow = MotionWorkflow::new();

        workflow.begin_voting(&queue, caucus).unwrap();
        workflow.record_ballot(BallotCounts::new(3, 3, 0)).unwrap();
        let resolution = workflow.finalize(&mut queue, &mut agenda).unwrap();
        assert_eq!(resolution.required, 4);
        assert!(!resolution.is_passed());
    }

    #[test]
    fn test_finalize_without_votes_keeps_awaiting() {
        let (mut queue, caucus, _, _) = queue_with_three();
        let mut agenda = agenda_with_closing();
        let mut workflow = MotionWorkflow::new();

        workflow.begin_voting(&queue, caucus).unwrap();
        workflow.record_ballot(BallotCounts::new(0, 0, 7)).unwrap();
        let err = workflow.finalize(&mut queue, &mut agenda).unwrap_err();

        assert_eq!(err, DomainError::NoVotesCast);
        assert_eq!(workflow.ballot(), Some(BallotCounts::new(0, 0, 7)));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_finalize_oversized_ballot_still_passes() {
        let (mut queue, caucus, _, _) = queue_with_three();
        let mut agenda = agenda_with_closing();
        let mut workflow = MotionWorkflow::new();

        workflow.begin_voting(&queue, caucus).unwrap();
        workflow.record_ballot(BallotCounts::new(u32::MAX, 1, 0)).unwrap();
        let resolution = workflow.finalize(&mut queue, &mut agenda).unwrap();
        assert!(resolution.is_passed());
        assert_eq!(resolution.required, 2_147_483_649);
    }

    #[test]
    fn test_record_ballot_replaces() {
        let (queue, caucus, _, _) = queue_with_three();
        let mut workflow = MotionWorkflow::new();
        workflow.begin_voting(&queue, caucus).unwrap();
        assert_eq!(workflow.ballot(), Some(BallotCounts::default()));

        workflow.record_ballot(BallotCounts::new(3, 1, 0)).unwrap();
        workflow.record_ballot(BallotCounts::new(1, 1, 0)).unwrap();
        assert_eq!(workflow.ballot(), Some(BallotCounts::new(1, 1, 0)));
    }

    // ==================== State errors ====================

    #[test]
    fn test_operations_outside_valid_state() {
        let (mut queue, caucus, unmod, _) = queue_with_three();
        let mut agenda = agenda_with_closing();
        let mut workflow = MotionWorkflow::new();

        assert!(workflow.record_ballot(BallotCounts::new(1, 0, 0)).unwrap_err().is_invalid_state());
        assert!(workflow.finalize(&mut queue, &mut agenda).unwrap_err().is_invalid_state());
        assert!(workflow.cancel(&mut queue).unwrap_err().is_invalid_state());

        workflow.begin_voting(&queue, caucus).unwrap();
        let err = workflow.begin_voting(&queue, unmod).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidState {
                operation: "begin voting",
                state: "awaiting ballot"
            }
        );
        assert_eq!(workflow.active_motion().unwrap().queue_id, caucus);
    }

    #[test]
    fn test_begin_voting_unknown_motion() {
        let (queue, _, _, _) = queue_with_three();
        let mut workflow = MotionWorkflow::new();
        let err = workflow.begin_voting(&queue, QueueId(99)).unwrap_err();
        assert!(err.is_not_found());
        assert!(workflow.state().is_idle());
    }

    // ==================== Cancel ====================

    #[test]
    fn test_cancel_withdraws_without_side_effects() {
        let (mut queue, caucus, unmod, set_agenda) = queue_with_three();
        let agenda = agenda_with_closing();
        let mut workflow = MotionWorkflow::new();

        workflow.begin_voting(&queue, caucus).unwrap();
        workflow.record_ballot(BallotCounts::new(9, 0, 0)).unwrap();
        let cancelled = workflow.cancel(&mut queue).unwrap();

        assert_eq!(cancelled.queue_id, caucus);
        assert_eq!(queue.ids(), vec![unmod, set_agenda]);
        assert_eq!(agenda.len(), 2);
        assert!(workflow.state().is_idle());
    }
}
