//! Timer configuration from TOML (`[timer]` section)

use mun_domain::UrgencyThresholds;
use mun_domain::config::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw timer configuration from TOML
///
/// # Example
///
/// ```toml
/// [timer]
/// warning_percent = 25   # countdown turns yellow at or below this share
/// danger_percent = 10    # and red at or below this one
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimerConfig {
    pub warning_percent: u8,
    pub danger_percent: u8,
}

impl Default for FileTimerConfig {
    fn default() -> Self {
        let defaults = UrgencyThresholds::default();
        Self {
            warning_percent: defaults.warning_percent,
            danger_percent: defaults.danger_percent,
        }
    }
}

impl FileTimerConfig {
    /// Convert to thresholds, falling back to the defaults on bad values
    pub fn to_thresholds(&self) -> (UrgencyThresholds, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        for (field, value) in [
            ("timer.warning_percent", self.warning_percent),
            ("timer.danger_percent", self.danger_percent),
        ] {
            if value > 100 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ThresholdOutOfRange {
                        field: field.to_string(),
                    },
                    format!("{}: {} is above 100", field, value),
                ));
            }
        }
        if issues.is_empty() && self.danger_percent >= self.warning_percent {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ThresholdsOutOfOrder,
                format!(
                    "timer.danger_percent ({}) must be below timer.warning_percent ({}), using defaults",
                    self.danger_percent, self.warning_percent
                ),
            ));
        }

        if issues.is_empty() {
            let thresholds = UrgencyThresholds {
                warning_percent: self.warning_percent,
                danger_percent: self.danger_percent,
            };
            (thresholds, issues)
        } else {
            (UrgencyThresholds::default(), issues)
        }
    }
}
