//! Persisted result of a plenary voting event

use crate::voting::{Ballot, MajorityMode, MajorityRuleConfig, VoteKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingSessionRecord {
    pub mode: MajorityMode,
    #[serde(rename = "voteType")]
    pub vote_kind: VoteKind,
    pub ballot: Ballot,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub saved_at: u64,
}

impl VotingSessionRecord {
    pub fn new(mode: MajorityMode, vote_kind: VoteKind, ballot: Ballot, saved_at: u64) -> Self {
        Self {
            mode,
            vote_kind,
            ballot,
            saved_at,
        }
    }

    /// Record of `ballot` under the mode and kind of `config`
    pub fn under(config: &MajorityRuleConfig, ballot: Ballot, saved_at: u64) -> Self {
        Self::new(config.mode, config.vote_kind, ballot, saved_at)
    }

    /// Field-wise equality ignoring the save timestamp
    pub fn same_content(&self, other: &Self) -> bool {
        self.mode == other.mode && self.vote_kind == other.vote_kind && self.ballot == other.ballot
    }

    /// Whether the ballot carries anything beyond a fresh form's defaults
    pub fn has_entered_votes(&self) -> bool {
        !self.ballot.is_untouched(self.vote_kind)
    }
}
