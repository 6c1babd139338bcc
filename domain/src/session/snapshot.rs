//! Session snapshot: the full persisted state as one JSON document
//!
//! ```text
//! {
//!   "topics":          [{ "id", "title" }],
//!   "events":          [{ "id", "type", "title", ...kind fields }],
//!   "delegates":       [{ "id", "code", "name" }],
//!   "chair":           { "name" },
//!   "votingConfig":    { "majorityMode", "voteType", "securityCouncil" },
//!   "speechesDefaults":{ "round1Seconds", "round2Seconds", "rightOfReplySeconds" },
//!   "votingResults":   { "<eventId>": { "mode", "voteType", "ballot", "savedAt" } }
//! }
//! ```
//!
//! Import checks the raw JSON shape first, then deserializes item by item,
//! then fills in defaults. Nothing is adopted unless every step succeeds.

use super::record::VotingSessionRecord;
use crate::agenda::entities::{AgendaEvent, Chair, Delegate, EventKind, Topic};
use crate::core::error::DomainError;
use crate::core::ids::{DelegateCode, EventId};
use crate::voting::{Ballot, MajorityMode, MajorityRuleConfig, SecurityCouncilConfig, VoteKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Default speaking times for general speeches, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechesDefaults {
    #[serde(rename = "round1Seconds")]
    pub round1_seconds: u32,
    #[serde(rename = "round2Seconds")]
    pub round2_seconds: u32,
    pub right_of_reply_seconds: u32,
}

impl Default for SpeechesDefaults {
    fn default() -> Self {
        Self {
            round1_seconds: 120,
            round2_seconds: 120,
            right_of_reply_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub topics: Vec<Topic>,
    pub events: Vec<AgendaEvent>,
    pub delegates: Vec<Delegate>,
    pub chair: Chair,
    pub voting_config: MajorityRuleConfig,
    pub speeches_defaults: SpeechesDefaults,
    pub voting_results: BTreeMap<EventId, VotingSessionRecord>,
}

/// Optional sections as they appear in a file, before defaults
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionalSections {
    #[serde(default)]
    voting_config: Option<PartialVotingConfig>,
    #[serde(default)]
    speeches_defaults: Option<SpeechesDefaults>,
    #[serde(default)]
    voting_results: Option<BTreeMap<EventId, VotingSessionRecord>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialVotingConfig {
    #[serde(default)]
    majority_mode: Option<MajorityMode>,
    #[serde(default)]
    vote_type: Option<VoteKind>,
    #[serde(default)]
    security_council: Option<SecurityCouncilConfig>,
}

impl SessionSnapshot {
    /// Snapshot with no voting results and default optional sections
    pub fn new(
        topics: Vec<Topic>,
        events: Vec<AgendaEvent>,
        delegates: Vec<Delegate>,
        chair: Chair,
    ) -> Self {
        let voting_config = default_voting_config(&delegates);
        Self {
            topics,
            events,
            delegates,
            chair,
            voting_config,
            speeches_defaults: SpeechesDefaults::default(),
            voting_results: BTreeMap::new(),
        }
    }

    /// Parse and validate an imported snapshot
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| DomainError::validation(format!("Invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        check_shape(&value)?;

        let topics = typed_items::<Topic>(&value["topics"], "topic")?;
        let events = typed_items::<AgendaEvent>(&value["events"], "event")?;
        let delegates = typed_items::<Delegate>(&value["delegates"], "delegate")?;
        let chair: Chair = serde_json::from_value(value["chair"].clone())
            .map_err(|e| DomainError::validation(format!("Invalid chair: {}", e)))?;
        let optional: OptionalSections = serde_json::from_value(value)
            .map_err(|e| DomainError::validation(format!("Invalid optional section: {}", e)))?;

        let snapshot = Self::with_defaults(topics, events, delegates, chair, optional);
        snapshot.check_consistency()?;
        Ok(snapshot)
    }

    fn with_defaults(
        topics: Vec<Topic>,
        events: Vec<AgendaEvent>,
        delegates: Vec<Delegate>,
        chair: Chair,
        optional: OptionalSections,
    ) -> Self {
        let partial = optional.voting_config.unwrap_or_default();
        let mut security_council = partial
            .security_council
            .unwrap_or_else(|| SecurityCouncilConfig::from_delegate_codes(&delegate_codes(&delegates)));
        security_council.normalize();

        let voting_config = MajorityRuleConfig::new(
            partial.majority_mode.unwrap_or_default(),
            partial.vote_type.unwrap_or_default(),
        )
        .with_security_council(security_council);

        Self {
            topics,
            events,
            delegates,
            chair,
            voting_config,
            speeches_defaults: optional.speeches_defaults.unwrap_or_default(),
            voting_results: optional.voting_results.unwrap_or_default(),
        }
    }

    fn check_consistency(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        if let Some(dup) = self.events.iter().find(|e| !seen.insert(e.id)) {
            return Err(DomainError::validation(format!(
                "Duplicate event id {}",
                dup.id
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.topics.iter().find(|t| !seen.insert(t.id)) {
            return Err(DomainError::validation(format!(
                "Duplicate topic id {}",
                dup.id
            )));
        }

        for (event_id, record) in &self.voting_results {
            if let Ballot::Counts(counts) = &record.ballot {
                counts.check_range().map_err(|e| match e {
                    DomainError::Validation(message) => DomainError::validation(format!(
                        "Voting result for event {}: {}",
                        event_id, message
                    )),
                    other => other,
                })?;
            }
        }

        self.voting_config.validate()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Default rule configuration for a conference with these delegates
pub fn default_voting_config(delegates: &[Delegate]) -> MajorityRuleConfig {
    MajorityRuleConfig::default()
        .with_security_council(SecurityCouncilConfig::from_delegate_codes(&delegate_codes(
            delegates,
        )))
}

fn delegate_codes(delegates: &[Delegate]) -> Vec<DelegateCode> {
    delegates.iter().map(|d| d.code.clone()).collect()
}

fn typed_items<T: DeserializeOwned>(array: &Value, what: &str) -> Result<Vec<T>, DomainError> {
    let items = array.as_array().map(Vec::as_slice).unwrap_or_default();
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item.clone()).map_err(|e| {
                DomainError::validation(format!("Invalid {} at index {}: {}", what, i, e))
            })
        })
        .collect()
}

/// Structural checks on raw JSON, reported with the offending index
fn check_shape(data: &Value) -> Result<(), DomainError> {
    let fail = |message: String| -> Result<(), DomainError> { Err(DomainError::Validation(message)) };

    if !data.is_object() {
        return fail("Data must be an object".into());
    }
    for key in ["topics", "events", "delegates"] {
        if !data[key].is_array() {
            return fail(format!("Missing {} array", key));
        }
    }
    if !data["chair"]["name"].is_string() {
        return fail("Missing chair name".into());
    }

    for (i, topic) in items(&data["topics"]).enumerate() {
        if !topic["id"].is_number() || !topic["title"].is_string() {
            return fail(format!("Invalid topic at index {}", i));
        }
    }

    for (i, event) in items(&data["events"]).enumerate() {
        if !event["id"].is_number() || !event["type"].is_string() || !event["title"].is_string() {
            return fail(format!("Invalid event at index {}", i));
        }
        let kind = event["type"].as_str().unwrap_or_default();
        let timed = event["totalTime"].is_number() && event["speakerTime"].is_number();
        match kind {
            "moderated" if !timed => {
                return fail(format!("Moderated event missing times at index {}", i));
            }
            "unmoderated" if !event["duration"].is_number() => {
                return fail(format!("Unmoderated event missing duration at index {}", i));
            }
            "speeches" if !timed => {
                return fail(format!("Speeches event missing times at index {}", i));
            }
            "speeches" if !event["speechSubject"].is_null() && !event["speechSubject"].is_string() => {
                return fail(format!("Speeches event has invalid subject at index {}", i));
            }
            _ if !EventKind::NAMES.contains(&kind) => {
                return fail(format!("Unknown event type '{}' at index {}", kind, i));
            }
            _ => {}
        }
        if let Some(timer) = event.get("timer")
            && !timer.is_null()
            && !timer.as_f64().is_some_and(|t| t >= 0.0)
        {
            return fail(format!(
                "Event at index {} has invalid timer (must be a non-negative number of seconds)",
                i
            ));
        }
    }

    for (i, delegate) in items(&data["delegates"]).enumerate() {
        if !delegate["id"].is_number() || !delegate["code"].is_string() || !delegate["name"].is_string()
        {
            return fail(format!("Invalid delegate at index {}", i));
        }
    }

    Ok(())
}

fn items(value: &Value) -> impl Iterator<Item = &Value> {
    value.as_array().into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::TopicId;
    use crate::voting::{Ballot, BallotCounts};

    fn minimal() -> Value {
        serde_json::json!({
            "topics": [{ "id": 1, "title": "Climate" }],
            "events": [
                { "id": 1, "type": "general", "title": "Opening", "subtitle": "Welcome", "topicId": null },
                { "id": 2, "type": "moderated", "title": "Moderated Caucus", "subtitle": "",
                  "topicId": 1, "totalTime": 600, "speakerTime": 60 },
                { "id": 3, "type": "voting", "title": "Voting", "subtitle": "", "topicId": 1 }
            ],
            "delegates": [{ "id": 1, "code": "USA", "name": "United States" }],
            "chair": { "name": "Alex" }
        })
    }

    fn rejects(value: Value, expected: &str) {
        match SessionSnapshot::from_value(value) {
            Err(DomainError::Validation(message)) => {
                assert!(message.contains(expected), "{message}")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    // ==================== Defaults ====================

    #[test]
    fn test_missing_sections_get_defaults() {
        let snapshot = SessionSnapshot::from_value(minimal()).unwrap();
        assert_eq!(snapshot.voting_config.mode, MajorityMode::Simple);
        assert_eq!(snapshot.voting_config.vote_kind, VoteKind::Substantive);
        assert_eq!(snapshot.speeches_defaults, SpeechesDefaults::default());
        assert!(snapshot.voting_results.is_empty());

        // one delegate: the council is seated from it and only USA stays permanent
        let council = &snapshot.voting_config.security_council;
        assert_eq!(council.members, vec![DelegateCode::from("USA")]);
        assert_eq!(council.permanent_members, vec![DelegateCode::from("USA")]);
        assert_eq!(council.required_yes, 9);
    }

    #[test]
    fn test_partial_security_council_is_completed() {
        let mut value = minimal();
        value["votingConfig"] = serde_json::json!({
            "majorityMode": "securityCouncil",
            "securityCouncil": { "members": ["USA", "DEU"], "requiredYes": 0 }
        });
        let snapshot = SessionSnapshot::from_value(value).unwrap();
        let council = &snapshot.voting_config.security_council;
        assert_eq!(snapshot.voting_config.mode, MajorityMode::SecurityCouncil);
        assert_eq!(council.required_yes, 9);
        assert_eq!(council.permanent_members, vec![DelegateCode::from("USA")]);
    }

    // ==================== Validation ====================

    #[test]
    fn test_rejects_missing_arrays() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("delegates");
        rejects(value, "Missing delegates array");
        rejects(serde_json::json!([1, 2]), "Data must be an object");
    }

    #[test]
    fn test_rejects_missing_chair() {
        let mut value = minimal();
        value["chair"] = serde_json::json!({});
        rejects(value, "Missing chair name");
    }

    #[test]
    fn test_rejects_bad_items_with_index() {
        let mut value = minimal();
        value["topics"][0]["id"] = serde_json::json!("one");
        rejects(value, "Invalid topic at index 0");

        let mut value = minimal();
        value["events"][1].as_object_mut().unwrap().remove("speakerTime");
        rejects(value, "Moderated event missing times at index 1");

        let mut value = minimal();
        value["events"][2]["timer"] = serde_json::json!(-5);
        rejects(value, "Event at index 2 has invalid timer");

        let mut value = minimal();
        value["delegates"][0]["code"] = serde_json::json!(7);
        rejects(value, "Invalid delegate at index 0");
    }

    #[test]
    fn test_rejects_unknown_type_and_duplicate_ids() {
        let mut value = minimal();
        value["events"][0]["type"] = serde_json::json!("party");
        rejects(value, "Unknown event type 'party' at index 0");

        let mut value = minimal();
        value["events"][2]["id"] = serde_json::json!(2);
        rejects(value, "Duplicate event id 2");
    }

    #[test]
    fn test_rejects_oversized_saved_counts() {
        let mut value = minimal();
        value["votingResults"] = serde_json::json!({
            "3": {
                "mode": "simple",
                "voteType": "substantive",
                "ballot": { "counts": { "for": 4294967295u64, "against": 1, "abstain": 0 } },
                "savedAt": 0
            }
        });
        rejects(value, "Voting result for event 3: Vote count 'for' is too large");
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(SessionSnapshot::from_json("{ not json").is_err());
    }

    // ==================== Round trip ====================

    #[test]
    fn test_export_then_import_is_equivalent() {
        let mut snapshot = SessionSnapshot::from_value(minimal()).unwrap();
        snapshot.voting_results.insert(
            EventId(3),
            VotingSessionRecord::new(
                MajorityMode::Simple,
                VoteKind::Substantive,
                Ballot::Counts(BallotCounts::new(12, 3, 1)),
                1_700_000_000_000,
            ),
        );

        let json = snapshot.to_json_pretty().unwrap();
        let back = SessionSnapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.events[1].topic_id, Some(TopicId(1)));

        let raw: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(raw["votingConfig"]["majorityMode"], "simple");
        assert_eq!(raw["votingResults"]["3"]["ballot"]["counts"]["for"], 12);
        assert_eq!(raw["speechesDefaults"]["round1Seconds"], 120);
    }
}
