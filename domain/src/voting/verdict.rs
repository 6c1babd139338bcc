//! Verdict of an evaluated ballot

use super::ballot::BallotCounts;
use crate::core::ids::DelegateCode;
use serde::{Deserialize, Serialize};

/// Outcome of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteOutcome {
    Passed,
    Failed,
    /// Only reachable under simple majority
    Tie,
}

impl VoteOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, VoteOutcome::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, VoteOutcome::Failed)
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, VoteOutcome::Tie)
    }
}

impl std::fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteOutcome::Passed => write!(f, "Passed"),
            VoteOutcome::Failed => write!(f, "Failed"),
            VoteOutcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Result of evaluating a ballot under a majority rule
///
/// A vetoed vote is always [`VoteOutcome::Failed`]; the veto is kept apart
/// so it can be reported as "failed by veto" rather than an ordinary failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub outcome: VoteOutcome,
    /// First permanent member (in seating order) that voted no
    pub vetoed_by: Option<DelegateCode>,
    /// Yes/no/abstain totals the verdict was computed from
    pub tally: BallotCounts,
    /// Affirmative votes that were needed, when the rule has a fixed threshold
    pub required: Option<u32>,
}

impl Verdict {
    pub fn new(outcome: VoteOutcome, tally: BallotCounts) -> Self {
        Self {
            outcome,
            vetoed_by: None,
            tally,
            required: None,
        }
    }

    pub fn with_required(mut self, required: u32) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_veto(mut self, code: DelegateCode) -> Self {
        self.outcome = VoteOutcome::Failed;
        self.vetoed_by = Some(code);
        self
    }

    pub fn is_passed(&self) -> bool {
        self.outcome.is_passed()
    }

    pub fn is_vetoed(&self) -> bool {
        self.vetoed_by.is_some()
    }

    /// Short headline, e.g. `PASSED`, `TIE`, `FAILED (Veto by RUS)`
    pub fn headline(&self) -> String {
        match (&self.outcome, &self.vetoed_by) {
            (VoteOutcome::Passed, _) => "PASSED".to_string(),
            (VoteOutcome::Tie, _) => "TIE".to_string(),
            (VoteOutcome::Failed, Some(code)) => format!("FAILED (Veto by {})", code),
            (VoteOutcome::Failed, None) => "FAILED".to_string(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.headline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_distinguishes_veto() {
        let tally = BallotCounts::new(9, 1, 0);
        let plain = Verdict::new(VoteOutcome::Failed, tally);
        let vetoed = Verdict::new(VoteOutcome::Passed, tally).with_veto("RUS".into());

        assert_eq!(plain.to_string(), "FAILED");
        assert_eq!(vetoed.to_string(), "FAILED (Veto by RUS)");
        assert!(vetoed.outcome.is_failed());
        assert!(vetoed.is_vetoed());
        assert!(!plain.is_vetoed());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(VoteOutcome::Passed.to_string(), "Passed");
        assert_eq!(VoteOutcome::Failed.to_string(), "Failed");
        assert_eq!(VoteOutcome::Tie.to_string(), "Tie");
        assert_eq!(
            Verdict::new(VoteOutcome::Tie, BallotCounts::new(2, 2, 0)).headline(),
            "TIE"
        );
    }
}
