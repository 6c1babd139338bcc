//! Plenary voting domain
//!
//! - [`rule`]: majority modes and the Security Council configuration
//! - [`ballot`]: aggregate counts and per-member ballots
//! - [`verdict`]: pass/fail/tie outcome with veto attribution
//! - [`evaluator`]: the pure tally evaluator

pub mod ballot;
pub mod evaluator;
pub mod rule;
pub mod verdict;

pub use ballot::{Ballot, BallotCounts, MAX_VOTES, MemberBallot, MemberChoice};
pub use evaluator::{evaluate, floor_majority_required, two_thirds_required};
pub use rule::{MajorityMode, MajorityRuleConfig, SecurityCouncilConfig, VoteKind};
pub use verdict::{Verdict, VoteOutcome};
