//! Majority rules for plenary votes
//!
//! This module defines the configuration used to decide whether a ballot passes.

use crate::core::error::DomainError;
use crate::core::ids::DelegateCode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Standard permanent members of the Security Council
pub const STANDARD_P5: [&str; 5] = ["USA", "CHN", "GBR", "FRA", "RUS"];

/// Standard fifteen-seat council uses nine affirmative votes
pub const DEFAULT_REQUIRED_YES: u32 = 9;

/// Rule for determining whether a plenary vote passes
///
/// - `Simple`: more for than against (abstentions excluded); ties are reported
/// - `TwoThirds`: at least two thirds of present-and-voting in favour
/// - `SecurityCouncil`: per-member ballot, yes threshold plus P5 veto
/// - `Consensus`: no votes against
///
/// # Example
///
/// ```
/// use mun_domain::voting::MajorityMode;
///
/// let mode: MajorityMode = "twoThirds".parse().unwrap();
/// assert_eq!(mode, MajorityMode::TwoThirds);
/// assert!(!mode.uses_member_ballot());
/// assert!(MajorityMode::SecurityCouncil.uses_member_ballot());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MajorityMode {
    #[default]
    Simple,
    TwoThirds,
    SecurityCouncil,
    Consensus,
}

impl MajorityMode {
    pub const ALL: [MajorityMode; 4] = [
        MajorityMode::Simple,
        MajorityMode::TwoThirds,
        MajorityMode::SecurityCouncil,
        MajorityMode::Consensus,
    ];

    /// Identifier as used in snapshots and configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            MajorityMode::Simple => "simple",
            MajorityMode::TwoThirds => "twoThirds",
            MajorityMode::SecurityCouncil => "securityCouncil",
            MajorityMode::Consensus => "consensus",
        }
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> &'static str {
        match self {
            MajorityMode::Simple => "Simple Majority",
            MajorityMode::TwoThirds => "Two Thirds Majority",
            MajorityMode::SecurityCouncil => "Security Council",
            MajorityMode::Consensus => "Consensus Vote",
        }
    }

    /// Security Council votes are cast per member instead of as aggregate counts
    pub fn uses_member_ballot(&self) -> bool {
        matches!(self, MajorityMode::SecurityCouncil)
    }
}

impl std::fmt::Display for MajorityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for MajorityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "simple" | "simplemajority" => Ok(MajorityMode::Simple),
            "twothirds" | "2/3" | "twothirdsmajority" => Ok(MajorityMode::TwoThirds),
            "securitycouncil" | "sc" => Ok(MajorityMode::SecurityCouncil),
            "consensus" => Ok(MajorityMode::Consensus),
            _ => Err(format!(
                "Unknown majority mode: {}. Valid: simple, twoThirds, securityCouncil, consensus",
                s
            )),
        }
    }
}

/// Whether a vote is substantive or procedural
///
/// Procedural votes do not offer abstention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    #[default]
    Substantive,
    Procedural,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Substantive => "substantive",
            VoteKind::Procedural => "procedural",
        }
    }

    pub fn allows_abstain(&self) -> bool {
        matches!(self, VoteKind::Substantive)
    }
}

impl std::fmt::Display for VoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substantive" => Ok(VoteKind::Substantive),
            "procedural" => Ok(VoteKind::Procedural),
            _ => Err(format!(
                "Unknown vote type: {}. Valid: substantive, procedural",
                s
            )),
        }
    }
}

fn standard_p5() -> Vec<DelegateCode> {
    STANDARD_P5.iter().map(|c| DelegateCode::from(*c)).collect()
}

fn default_required_yes() -> u32 {
    DEFAULT_REQUIRED_YES
}

/// Security Council membership and threshold
///
/// Invariant (after [`normalize`](Self::normalize) or a successful
/// [`validate`](Self::validate)): members are unique and every permanent
/// member is also a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityCouncilConfig {
    /// Seated members, in ballot order
    #[serde(default)]
    pub members: Vec<DelegateCode>,
    /// Members holding veto power
    #[serde(rename = "p5", default = "standard_p5")]
    pub permanent_members: Vec<DelegateCode>,
    /// Affirmative votes needed, independent of the number of members
    #[serde(rename = "requiredYes", default = "default_required_yes")]
    pub required_yes: u32,
}

impl Default for SecurityCouncilConfig {
    fn default() -> Self {
        Self::from_delegate_codes(&[])
    }
}

impl SecurityCouncilConfig {
    /// Create a validated configuration
    pub fn new(
        members: Vec<DelegateCode>,
        permanent_members: Vec<DelegateCode>,
        required_yes: u32,
    ) -> Result<Self, DomainError> {
        let config = Self {
            members,
            permanent_members,
            required_yes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Default council seated from the first delegates of the conference
    ///
    /// Takes between ten and fifteen codes; falls back to the ten standard
    /// codes when no delegates are known.
    pub fn from_delegate_codes(codes: &[DelegateCode]) -> Self {
        let members = if codes.is_empty() {
            ["USA", "CHN", "GBR", "FRA", "RUS", "DEU", "JPN", "IND", "BRA", "CAN"]
                .iter()
                .map(|c| DelegateCode::from(*c))
                .collect()
        } else {
            let take = codes.len().clamp(10, 15).min(codes.len());
            codes[..take].to_vec()
        };

        let mut config = Self {
            members,
            permanent_members: standard_p5(),
            required_yes: DEFAULT_REQUIRED_YES,
        };
        config.normalize();
        config
    }

    pub fn is_member(&self, code: &DelegateCode) -> bool {
        self.members.contains(code)
    }

    pub fn is_permanent(&self, code: &DelegateCode) -> bool {
        self.permanent_members.contains(code)
    }

    /// Check the membership invariants
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.required_yes < 1 {
            return Err(DomainError::validation(
                "Security Council requiredYes must be at least 1",
            ));
        }

        let mut seen = HashSet::new();
        for code in &self.members {
            if !seen.insert(code) {
                return Err(DomainError::validation(format!(
                    "Security Council member {} listed twice",
                    code
                )));
            }
        }

        if let Some(outsider) = self
            .permanent_members
            .iter()
            .find(|code| !self.members.contains(code))
        {
            return Err(DomainError::validation(format!(
                "Permanent member {} is not a Security Council member",
                outsider
            )));
        }

        Ok(())
    }

    /// Repair a loosely specified configuration in place
    ///
    /// Drops duplicate members, drops permanent members that are not seated,
    /// and resets a zero threshold to the default.
    pub fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.members.retain(|code| seen.insert(code.clone()));

        let mut seen = HashSet::new();
        let members = &self.members;
        self.permanent_members
            .retain(|code| members.contains(code) && seen.insert(code.clone()));

        if self.required_yes < 1 {
            self.required_yes = DEFAULT_REQUIRED_YES;
        }
    }
}

/// Complete majority-rule configuration for plenary votes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MajorityRuleConfig {
    #[serde(rename = "majorityMode", default)]
    pub mode: MajorityMode,
    #[serde(rename = "voteType", default)]
    pub vote_kind: VoteKind,
    /// Only meaningful when `mode` is [`MajorityMode::SecurityCouncil`]
    #[serde(default)]
    pub security_council: SecurityCouncilConfig,
}

impl MajorityRuleConfig {
    pub fn new(mode: MajorityMode, vote_kind: VoteKind) -> Self {
        Self {
            mode,
            vote_kind,
            security_council: SecurityCouncilConfig::default(),
        }
    }

    pub fn with_security_council(mut self, council: SecurityCouncilConfig) -> Self {
        self.security_council = council;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.security_council.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<DelegateCode> {
        list.iter().map(|c| DelegateCode::from(*c)).collect()
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("simple".parse::<MajorityMode>().ok(), Some(MajorityMode::Simple));
        assert_eq!(
            "twoThirds".parse::<MajorityMode>().ok(),
            Some(MajorityMode::TwoThirds)
        );
        assert_eq!(
            "two-thirds".parse::<MajorityMode>().ok(),
            Some(MajorityMode::TwoThirds)
        );
        assert_eq!(
            "security_council".parse::<MajorityMode>().ok(),
            Some(MajorityMode::SecurityCouncil)
        );
        assert_eq!(
            "Consensus".parse::<MajorityMode>().ok(),
            Some(MajorityMode::Consensus)
        );
        assert!("plurality".parse::<MajorityMode>().is_err());
    }

    #[test]
    fn test_mode_serializes_camel_case() {
        let json = serde_json::to_string(&MajorityMode::TwoThirds).unwrap();
        assert_eq!(json, "\"twoThirds\"");
        let mode: MajorityMode = serde_json::from_str("\"securityCouncil\"").unwrap();
        assert_eq!(mode, MajorityMode::SecurityCouncil);
    }

    #[test]
    fn test_vote_kind_abstain() {
        assert!(VoteKind::Substantive.allows_abstain());
        assert!(!VoteKind::Procedural.allows_abstain());
        assert_eq!("procedural".parse::<VoteKind>().ok(), Some(VoteKind::Procedural));
    }

    #[test]
    fn test_council_rejects_outside_permanent_member() {
        let result = SecurityCouncilConfig::new(codes(&["USA", "DEU"]), codes(&["CHN"]), 9);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_council_rejects_duplicate_members() {
        let result = SecurityCouncilConfig::new(codes(&["USA", "USA"]), vec![], 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_council_rejects_zero_threshold() {
        let result = SecurityCouncilConfig::new(codes(&["USA"]), vec![], 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_threshold_independent_of_member_count() {
        let config = SecurityCouncilConfig::new(codes(&["USA", "FRA"]), codes(&["USA"]), 12);
        assert_eq!(config.unwrap().required_yes, 12);
    }

    #[test]
    fn test_normalize_restores_invariants() {
        let mut config = SecurityCouncilConfig {
            members: codes(&["USA", "DEU", "USA"]),
            permanent_members: codes(&["USA", "CHN"]),
            required_yes: 0,
        };
        config.normalize();
        assert_eq!(config.members, codes(&["USA", "DEU"]));
        assert_eq!(config.permanent_members, codes(&["USA"]));
        assert_eq!(config.required_yes, DEFAULT_REQUIRED_YES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_council_from_delegates() {
        let default = SecurityCouncilConfig::default();
        assert_eq!(default.members.len(), 10);
        assert_eq!(default.permanent_members.len(), 5);

        let many: Vec<DelegateCode> = (0..20).map(|i| DelegateCode::new(format!("D{i}"))).collect();
        assert_eq!(SecurityCouncilConfig::from_delegate_codes(&many).members.len(), 15);

        let few = codes(&["USA", "FRA", "KEN"]);
        let council = SecurityCouncilConfig::from_delegate_codes(&few);
        assert_eq!(council.members, few);
        assert_eq!(council.permanent_members, codes(&["USA", "FRA"]));
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let json = r#"{"majorityMode":"consensus","securityCouncil":{"members":["USA","KEN"]}}"#;
        let config: MajorityRuleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.mode, MajorityMode::Consensus);
        assert_eq!(config.vote_kind, VoteKind::Substantive);
        assert_eq!(config.security_council.required_yes, 9);
        assert_eq!(config.security_council.permanent_members.len(), 5);
    }
}
