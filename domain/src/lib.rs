//! Domain layer for mun-chair
//!
//! This crate contains the session engine for a Model UN chair: vote
//! tallying, floor motions, the agenda, and the persisted snapshot format.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Plenary votes
//!
//! A [`Ballot`] is evaluated under a [`MajorityRuleConfig`] into a
//! [`Verdict`]. Four regimes exist: simple, two-thirds, consensus and
//! Security Council (with permanent-member veto).
//!
//! ## Floor motions
//!
//! Motions are submitted into a [`MotionQueue`], presented in disruption
//! order, and resolved one at a time by the [`MotionWorkflow`]. Motions
//! always pass on a strict majority of yes + no. A passed motion becomes a
//! new [`AgendaEvent`] and obsoletes every other queued motion.
//!
//! ## Timers
//!
//! [`Countdown`] is a sibling of the voting core; neither depends on the
//! other.

pub mod agenda;
pub mod config;
pub mod core;
pub mod motion;
pub mod session;
pub mod timer;
pub mod voting;

// Re-export commonly used types
pub use agenda::{
    AgendaEvent, Agenda, Chair, Delegate, Direction, EventDraft, EventKind, EventType, Topic,
    TopicList,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::{DomainError, EntityKind},
    ids::{DelegateCode, DelegateId, EventId, QueueId, TopicId},
};
pub use motion::{
    CATALOG, Motion, MotionId, MotionParameters, MotionQueue, MotionWorkflow, OrderedView,
    ParameterName, QueuedMotion, Resolution, WorkflowState, find_motion,
};
pub use session::{
    SaveOutcome, SessionSnapshot, SpeechesDefaults, VotingSessionRecord, VotingSessionStore,
};
pub use timer::{Countdown, EventTimers, TickOutcome, Urgency, UrgencyThresholds};
pub use voting::{
    Ballot, BallotCounts, MAX_VOTES, MajorityMode, MajorityRuleConfig, MemberBallot, MemberChoice,
    SecurityCouncilConfig, Verdict, VoteKind, VoteOutcome, evaluate,
};
