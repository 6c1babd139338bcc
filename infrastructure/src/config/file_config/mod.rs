//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod repl;
mod session;
mod timer;
mod voting;

pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;
pub use session::FileSessionConfig;
pub use timer::FileTimerConfig;
pub use voting::FileVotingConfig;

use mun_domain::config::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Snapshot, autosave and journal settings
    pub session: FileSessionConfig,
    /// Voting defaults for a new session
    pub voting: FileVotingConfig,
    /// Countdown urgency thresholds
    pub timer: FileTimerConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Enum parse failures for voting fields (majority_mode, vote_type)
    /// 2. Security Council threshold and permanent members
    /// 3. Timer urgency thresholds
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Enum parse validation
        issues.extend(self.voting.parse_majority_mode().1);
        issues.extend(self.voting.parse_vote_kind().1);

        // 2. Security Council
        issues.extend(self.voting.council_issues());

        // 3. Timer thresholds
        issues.extend(self.timer.to_thresholds().1);

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mun_domain::config::{ConfigIssueCode, Severity};
    use mun_domain::{MajorityMode, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[session]
snapshot = "gaor.json"
autosave = false
journal = "gaor.jsonl"

[voting]
majority_mode = "twoThirds"
vote_type = "procedural"
required_yes = 7

[timer]
warning_percent = 30
danger_percent = 5

[output]
format = "json"
color = false

[repl]
confirm_cancel = false
history_file = "~/.local/share/mun-chair/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.snapshot, "gaor.json");
        assert!(!config.session.autosave);
        assert_eq!(config.session.journal.as_deref(), Some("gaor.jsonl"));
        assert_eq!(config.voting.parse_majority_mode().0, MajorityMode::TwoThirds);
        assert_eq!(config.voting.required_yes, 7);
        assert_eq!(config.timer.warning_percent, 30);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.confirm_cancel);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FileConfig = toml::from_str("[voting]\nrequired_yes = 11\n").unwrap();
        assert_eq!(config.session, FileSessionConfig::default());
        assert_eq!(config.voting.majority_mode, "simple");
        assert_eq!(config.voting.required_yes, 11);
    }

    // ==================== Validation ====================

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[voting]
majority_mode = "plurality"
vote_type = "secret"
required_yes = 0

[timer]
warning_percent = 5
danger_percent = 10
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 4);

        let enum_fields: Vec<_> = issues
            .iter()
            .filter_map(|i| match &i.code {
                ConfigIssueCode::InvalidEnumValue { field, .. } => Some(field.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(enum_fields, vec!["voting.majority_mode", "voting.vote_type"]);
        assert!(issues
            .iter()
            .any(|i| i.code == ConfigIssueCode::ZeroRequiredYes && i.severity == Severity::Error));
        assert!(issues
            .iter()
            .any(|i| i.code == ConfigIssueCode::ThresholdsOutOfOrder));
    }
}
