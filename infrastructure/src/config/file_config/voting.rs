//! Voting configuration from TOML (`[voting]` section)
//!
//! Only used to seed a session that starts without a snapshot file; a
//! loaded snapshot carries its own voting configuration.

use mun_domain::config::{ConfigIssue, ConfigIssueCode, Severity};
use mun_domain::voting::rule::{DEFAULT_REQUIRED_YES, STANDARD_P5};
use mun_domain::{DelegateCode, MajorityMode, MajorityRuleConfig, SecurityCouncilConfig, VoteKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw voting configuration from TOML
///
/// # Example
///
/// ```toml
/// [voting]
/// majority_mode = "securityCouncil"   # simple, twoThirds, securityCouncil, consensus
/// vote_type = "substantive"           # substantive or procedural
/// required_yes = 9
/// permanent_members = ["USA", "CHN", "GBR", "FRA", "RUS"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    pub majority_mode: String,
    pub vote_type: String,
    pub required_yes: u32,
    pub permanent_members: Vec<String>,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        Self {
            majority_mode: "simple".to_string(),
            vote_type: "substantive".to_string(),
            required_yes: DEFAULT_REQUIRED_YES,
            permanent_members: STANDARD_P5.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl FileVotingConfig {
    /// Parse majority_mode into MajorityMode, returning warnings on failure.
    ///
    /// Accepts: "simple", "twoThirds", "two-thirds", "2/3", "securityCouncil", "sc", "consensus"
    pub fn parse_majority_mode(&self) -> (MajorityMode, Vec<ConfigIssue>) {
        match self.majority_mode.parse::<MajorityMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "voting.majority_mode".to_string(),
                        value: self.majority_mode.clone(),
                        valid_values: MajorityMode::ALL
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    },
                    message: format!(
                        "voting.majority_mode: unknown value '{}', falling back to 'simple'",
                        self.majority_mode
                    ),
                };
                (MajorityMode::default(), vec![issue])
            }
        }
    }

    /// Parse vote_type into VoteKind, returning warnings on failure.
    pub fn parse_vote_kind(&self) -> (VoteKind, Vec<ConfigIssue>) {
        match self.vote_type.parse::<VoteKind>() {
            Ok(kind) => (kind, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "voting.vote_type".to_string(),
                        value: self.vote_type.clone(),
                        valid_values: vec!["substantive".to_string(), "procedural".to_string()],
                    },
                    message: format!(
                        "voting.vote_type: unknown value '{}', falling back to 'substantive'",
                        self.vote_type
                    ),
                };
                (VoteKind::default(), vec![issue])
            }
        }
    }

    /// Check the Security Council settings
    pub fn council_issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.required_yes == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroRequiredYes,
                "voting.required_yes must be at least 1",
            ));
        }

        let mut seen = HashSet::new();
        for code in &self.permanent_members {
            if !seen.insert(code.to_uppercase()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicatePermanentMember { code: code.clone() },
                    format!("voting.permanent_members: '{}' listed twice", code),
                ));
            }
        }
        issues
    }

    /// Rule configuration for a new session seated with the standard council
    pub fn to_rule_config(&self) -> (MajorityRuleConfig, Vec<ConfigIssue>) {
        let (mode, mut issues) = self.parse_majority_mode();
        let (kind, kind_issues) = self.parse_vote_kind();
        issues.extend(kind_issues);

        let mut council = SecurityCouncilConfig::default();
        council.permanent_members = self
            .permanent_members
            .iter()
            .map(|c| DelegateCode::new(c.trim().to_uppercase()))
            .collect();
        council.required_yes = self.required_yes;
        council.normalize();

        (
            MajorityRuleConfig::new(mode, kind).with_security_council(council),
            issues,
        )
    }
}
