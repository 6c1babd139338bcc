//! Ballot types
//!
//! A ballot is either aggregate counts (simple, two-thirds, consensus and
//! motion votes) or a per-member choice map (Security Council).

use super::rule::{MajorityRuleConfig, SecurityCouncilConfig, VoteKind};
use crate::core::error::DomainError;
use crate::core::ids::DelegateCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest count accepted for any single ballot column
pub const MAX_VOTES: u32 = 100_000;

/// Aggregate vote counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BallotCounts {
    #[serde(rename = "for")]
    pub for_votes: u32,
    pub against: u32,
    pub abstain: u32,
}

impl BallotCounts {
    pub fn new(for_votes: u32, against: u32, abstain: u32) -> Self {
        Self {
            for_votes,
            against,
            abstain,
        }
    }

    /// Build counts from raw user input, rejecting negative numbers
    ///
    /// Negative values are never clamped: they indicate a marshaling bug or
    /// a typo and must be surfaced. Counts above [`MAX_VOTES`] are rejected
    /// the same way.
    pub fn from_raw(for_votes: i64, against: i64, abstain: i64) -> Result<Self, DomainError> {
        Ok(Self {
            for_votes: in_range("for", for_votes)?,
            against: in_range("against", against)?,
            abstain: in_range("abstain", abstain)?,
        })
    }

    /// Reject counts built without going through [`from_raw`](Self::from_raw)
    pub fn check_range(&self) -> Result<(), DomainError> {
        in_range("for", i64::from(self.for_votes))?;
        in_range("against", i64::from(self.against))?;
        in_range("abstain", i64::from(self.abstain))?;
        Ok(())
    }

    /// For + against; abstentions are not part of the denominator
    pub fn present_and_voting(&self) -> u32 {
        self.for_votes.saturating_add(self.against)
    }

    pub fn total(&self) -> u32 {
        self.present_and_voting().saturating_add(self.abstain)
    }

    pub fn is_empty(&self) -> bool {
        self.for_votes == 0 && self.against == 0 && self.abstain == 0
    }
}

fn in_range(field: &str, value: i64) -> Result<u32, DomainError> {
    if value < 0 {
        return Err(DomainError::validation(format!(
            "Vote count '{}' must not be negative (got {})",
            field, value
        )));
    }
    if value > i64::from(MAX_VOTES) {
        return Err(DomainError::validation(format!(
            "Vote count '{}' is too large ({}, at most {})",
            field, value, MAX_VOTES
        )));
    }
    // Bounded by MAX_VOTES above
    Ok(value as u32)
}

/// One Security Council member's choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberChoice {
    Yes,
    No,
    Abstain,
}

impl MemberChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberChoice::Yes => "yes",
            MemberChoice::No => "no",
            MemberChoice::Abstain => "abstain",
        }
    }

    /// Choice a fresh ballot starts with for the given vote kind
    pub fn default_for(kind: VoteKind) -> Self {
        if kind.allows_abstain() {
            MemberChoice::Abstain
        } else {
            MemberChoice::Yes
        }
    }
}

impl std::fmt::Display for MemberChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemberChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "for" => Ok(MemberChoice::Yes),
            "no" | "n" | "against" => Ok(MemberChoice::No),
            "abstain" | "a" => Ok(MemberChoice::Abstain),
            _ => Err(format!("Unknown choice: {}. Valid: yes, no, abstain", s)),
        }
    }
}

/// Per-member choices for a Security Council vote
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberBallot(BTreeMap<DelegateCode, MemberChoice>);

impl MemberBallot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ballot with every member at the default choice for `kind`
    pub fn default_for(council: &SecurityCouncilConfig, kind: VoteKind) -> Self {
        let choice = MemberChoice::default_for(kind);
        Self(
            council
                .members
                .iter()
                .map(|code| (code.clone(), choice))
                .collect(),
        )
    }

    pub fn with(mut self, code: impl Into<DelegateCode>, choice: MemberChoice) -> Self {
        self.set(code, choice);
        self
    }

    pub fn set(&mut self, code: impl Into<DelegateCode>, choice: MemberChoice) {
        self.0.insert(code.into(), choice);
    }

    pub fn get(&self, code: &DelegateCode) -> Option<MemberChoice> {
        self.0.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DelegateCode, MemberChoice)> {
        self.0.iter().map(|(code, choice)| (code, *choice))
    }

    /// Check the ballot covers exactly the seated members with legal choices
    pub fn validate(
        &self,
        council: &SecurityCouncilConfig,
        kind: VoteKind,
    ) -> Result<(), DomainError> {
        if let Some(missing) = council.members.iter().find(|c| !self.0.contains_key(*c)) {
            return Err(DomainError::validation(format!(
                "No choice recorded for Security Council member {}",
                missing
            )));
        }
        if let Some(stranger) = self.0.keys().find(|c| !council.is_member(c)) {
            return Err(DomainError::validation(format!(
                "{} is not a Security Council member",
                stranger
            )));
        }
        if !kind.allows_abstain()
            && let Some((code, _)) = self.iter().find(|(_, c)| *c == MemberChoice::Abstain)
        {
            return Err(DomainError::validation(format!(
                "{} cannot abstain on a procedural vote",
                code
            )));
        }
        Ok(())
    }
}

/// A ballot as entered by the chair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ballot {
    Counts(BallotCounts),
    Members(MemberBallot),
}

impl Ballot {
    /// Empty ballot of the shape the configured mode expects
    pub fn empty_for(config: &MajorityRuleConfig) -> Self {
        if config.mode.uses_member_ballot() {
            Ballot::Members(MemberBallot::default_for(
                &config.security_council,
                config.vote_kind,
            ))
        } else {
            Ballot::Counts(BallotCounts::default())
        }
    }

    /// Whether the ballot still holds only the values a fresh form starts with
    pub fn is_untouched(&self, kind: VoteKind) -> bool {
        match self {
            Ballot::Counts(counts) => counts.is_empty(),
            Ballot::Members(members) => {
                let default = MemberChoice::default_for(kind);
                members.iter().all(|(_, choice)| choice == default)
            }
        }
    }

    /// Check the ballot shape and values against a rule configuration
    pub fn validate(&self, config: &MajorityRuleConfig) -> Result<(), DomainError> {
        match (self, config.mode.uses_member_ballot()) {
            (Ballot::Counts(counts), false) => {
                counts.check_range()?;
                if !config.vote_kind.allows_abstain() && counts.abstain > 0 {
                    return Err(DomainError::validation(
                        "Procedural votes do not accept abstentions",
                    ));
                }
                Ok(())
            }
            (Ballot::Members(members), true) => {
                members.validate(&config.security_council, config.vote_kind)
            }
            (Ballot::Counts(_), true) => Err(DomainError::validation(
                "Security Council mode requires a per-member ballot",
            )),
            (Ballot::Members(_), false) => Err(DomainError::validation(format!(
                "{} mode requires aggregate vote counts",
                config.mode
            ))),
        }
    }
}
