//! Vote tally evaluation
//!
//! Pure functions translating a ballot into a [`Verdict`] under one of the
//! four majority regimes, plus the fixed floor rule used for motions.
//!
//! # Rules
//!
//! ```text
//! ┌──────────────────┬──────────────────────────────────────────────────────┐
//! │ mode             │ passes when (P = for + against)                      │
//! ├──────────────────┼──────────────────────────────────────────────────────┤
//! │ simple           │ P > 0 and for > against   (for == against -> Tie)    │
//! │ twoThirds        │ P > 0 and for >= ceil(2P / 3)                        │
//! │ consensus        │ against == 0 and (for > 0 or abstain > 0)            │
//! │ securityCouncil  │ yes >= requiredYes and no permanent member voted no  │
//! └──────────────────┴──────────────────────────────────────────────────────┘
//! ```

use super::ballot::{Ballot, BallotCounts, MemberBallot, MemberChoice};
use super::rule::{MajorityMode, MajorityRuleConfig, SecurityCouncilConfig};
use super::verdict::{Verdict, VoteOutcome};
use crate::core::error::DomainError;

/// Evaluate a ballot under the configured majority rule
///
/// The ballot is validated first (shape must match the mode, member ballots
/// must cover exactly the seated members, procedural votes take no
/// abstentions).
///
/// # Example
///
/// ```
/// use mun_domain::voting::{
///     evaluate, Ballot, BallotCounts, MajorityMode, MajorityRuleConfig, VoteKind, VoteOutcome,
/// };
///
/// let config = MajorityRuleConfig::new(MajorityMode::TwoThirds, VoteKind::Substantive);
/// let verdict = evaluate(&config, &Ballot::Counts(BallotCounts::new(4, 2, 0))).unwrap();
/// assert_eq!(verdict.outcome, VoteOutcome::Passed);
/// assert_eq!(verdict.required, Some(4));
/// ```
pub fn evaluate(config: &MajorityRuleConfig, ballot: &Ballot) -> Result<Verdict, DomainError> {
    ballot.validate(config)?;

    let verdict = match (config.mode, ballot) {
        (MajorityMode::Simple, Ballot::Counts(counts)) => evaluate_simple(counts),
        (MajorityMode::TwoThirds, Ballot::Counts(counts)) => evaluate_two_thirds(counts),
        (MajorityMode::Consensus, Ballot::Counts(counts)) => evaluate_consensus(counts),
        (MajorityMode::SecurityCouncil, Ballot::Members(members)) => {
            evaluate_security_council(&config.security_council, members)
        }
        // Shapes were checked by validate()
        (mode, _) => {
            return Err(DomainError::validation(format!(
                "Ballot shape does not match {} mode",
                mode
            )));
        }
    };

    Ok(verdict)
}

fn evaluate_simple(counts: &BallotCounts) -> Verdict {
    let present = counts.present_and_voting();
    let outcome = if present > 0 && counts.for_votes > counts.against {
        VoteOutcome::Passed
    } else if present > 0 && counts.for_votes == counts.against {
        VoteOutcome::Tie
    } else {
        VoteOutcome::Failed
    };
    Verdict::new(outcome, *counts).with_required(present / 2 + 1)
}

fn evaluate_two_thirds(counts: &BallotCounts) -> Verdict {
    let present = counts.present_and_voting();
    let required = two_thirds_required(present);
    let outcome = if present > 0 && counts.for_votes >= required {
        VoteOutcome::Passed
    } else {
        VoteOutcome::Failed
    };
    Verdict::new(outcome, *counts).with_required(required)
}

fn evaluate_consensus(counts: &BallotCounts) -> Verdict {
    let outcome = if counts.against == 0 && (counts.for_votes > 0 || counts.abstain > 0) {
        VoteOutcome::Passed
    } else {
        VoteOutcome::Failed
    };
    Verdict::new(outcome, *counts)
}

fn evaluate_security_council(council: &SecurityCouncilConfig, ballot: &MemberBallot) -> Verdict {
    let mut tally = BallotCounts::default();
    let mut vetoed_by = None;

    // Seating order decides which veto is reported when several P5 vote no
    for code in &council.members {
        match ballot.get(code) {
            Some(MemberChoice::Yes) => tally.for_votes += 1,
            Some(MemberChoice::No) => {
                tally.against += 1;
                if vetoed_by.is_none() && council.is_permanent(code) {
                    vetoed_by = Some(code.clone());
                }
            }
            Some(MemberChoice::Abstain) | None => tally.abstain += 1,
        }
    }

    let outcome = if tally.for_votes >= council.required_yes {
        VoteOutcome::Passed
    } else {
        VoteOutcome::Failed
    };

    let verdict = Verdict::new(outcome, tally).with_required(council.required_yes);
    match vetoed_by {
        Some(code) => verdict.with_veto(code),
        None => verdict,
    }
}

/// `ceil(2/3 * present)` in integer arithmetic
pub fn two_thirds_required(present: u32) -> u32 {
    let required = (2 * u64::from(present)).div_ceil(3);
    u32::try_from(required).unwrap_or(u32::MAX)
}

/// Yes votes a floor motion needs: a strict majority of yes + no
pub fn floor_majority_required(yes: u32, no: u32) -> u32 {
    let required = (u64::from(yes) + u64::from(no)) / 2 + 1;
    u32::try_from(required).unwrap_or(u32::MAX)
}
