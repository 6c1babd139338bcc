//! Agenda entities: topics, delegates, chair, events.
//!
//! Events are a tagged union over their kind: every variant carries exactly
//! the timing fields it needs. On the wire the tag is the `type` field, so
//! a moderated caucus looks like
//!
//! ```json
//! { "id": 2, "type": "moderated", "title": "Moderated Caucus",
//!   "subtitle": "Climate Solutions", "topicId": 1,
//!   "totalTime": 600, "speakerTime": 60 }
//! ```

use crate::core::ids::{DelegateCode, DelegateId, EventId, TopicId};
use serde::{Deserialize, Serialize};

/// A topic on the conference agenda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
}

/// A delegation present in the committee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegate {
    pub id: DelegateId,
    pub code: DelegateCode,
    pub name: String,
}

/// The presiding chair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chair {
    pub name: String,
}

impl Default for Chair {
    fn default() -> Self {
        Self {
            name: "Chair".to_string(),
        }
    }
}

/// Event type without its kind-specific fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    General,
    Moderated,
    Unmoderated,
    Voting,
    Speeches,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::General => "general",
            EventType::Moderated => "moderated",
            EventType::Unmoderated => "unmoderated",
            EventType::Voting => "voting",
            EventType::Speeches => "speeches",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind-specific part of an agenda event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventKind {
    General,
    #[serde(rename_all = "camelCase")]
    Moderated { total_time: u32, speaker_time: u32 },
    Unmoderated { duration: u32 },
    Voting,
    #[serde(rename_all = "camelCase")]
    Speeches {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speech_subject: Option<String>,
        total_time: u32,
        speaker_time: u32,
    },
}

impl EventKind {
    /// Tag values accepted in snapshots
    pub const NAMES: [&'static str; 5] = ["general", "moderated", "unmoderated", "voting", "speeches"];

    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::General => EventType::General,
            EventKind::Moderated { .. } => EventType::Moderated,
            EventKind::Unmoderated { .. } => EventType::Unmoderated,
            EventKind::Voting => EventType::Voting,
            EventKind::Speeches { .. } => EventType::Speeches,
        }
    }

    pub fn name(&self) -> &'static str {
        self.event_type().as_str()
    }

    pub fn is_voting(&self) -> bool {
        matches!(self, EventKind::Voting)
    }
}

/// An event as requested, before the agenda assigns it an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub kind: EventKind,
    pub title: String,
    pub subtitle: String,
    pub topic_id: Option<TopicId>,
    pub timer: Option<u32>,
}

impl EventDraft {
    pub fn new(kind: EventKind, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            subtitle: subtitle.into(),
            topic_id: None,
            timer: None,
        }
    }

    pub fn with_topic(mut self, topic_id: Option<TopicId>) -> Self {
        self.topic_id = topic_id;
        self
    }

    pub fn with_timer(mut self, seconds: u32) -> Self {
        self.timer = Some(seconds);
        self
    }
}

/// One item on the agenda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaEvent {
    pub id: EventId,
    #[serde(flatten)]
    pub kind: EventKind,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
    /// Optional generic countdown in seconds, valid for any kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<u32>,
}

impl AgendaEvent {
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            title: draft.title,
            subtitle: draft.subtitle,
            topic_id: draft.topic_id,
            timer: draft.timer,
        }
    }

    /// Closing remarks and adjournment stay at the end of the agenda
    pub fn is_closing(&self) -> bool {
        let title = self.title.to_lowercase();
        title.contains("closing") || title.contains("adjourn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moderated_event_json() {
        let event = AgendaEvent::from_draft(
            EventId(2),
            EventDraft::new(
                EventKind::Moderated {
                    total_time: 600,
                    speaker_time: 60,
                },
                "Moderated Caucus",
                "Climate Solutions",
            )
            .with_topic(Some(TopicId(1))),
        );

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "moderated");
        assert_eq!(json["totalTime"], 600);
        assert_eq!(json["speakerTime"], 60);
        assert_eq!(json["topicId"], 1);
        assert!(json.get("timer").is_none());

        let back: AgendaEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_general_event_with_timer_json() {
        let json = r#"{"id":1,"type":"general","title":"Opening","subtitle":"Welcome","topicId":null,"timer":300}"#;
        let event: AgendaEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, EventKind::General);
        assert_eq!(event.timer, Some(300));
        assert_eq!(event.topic_id, None);
    }

    #[test]
    fn test_speeches_subject_optional() {
        let json = r#"{"id":7,"type":"speeches","title":"GSL","subtitle":"","totalTime":600,"speakerTime":60}"#;
        let event: AgendaEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            event.kind,
            EventKind::Speeches {
                speech_subject: None,
                ..
            }
        ));
    }

    #[test]
    fn test_is_closing() {
        let closing = AgendaEvent::from_draft(
            EventId(6),
            EventDraft::new(EventKind::General, "Closing Remarks", ""),
        );
        let adjourn = AgendaEvent::from_draft(
            EventId(7),
            EventDraft::new(EventKind::General, "Adjournment", ""),
        );
        let voting = AgendaEvent::from_draft(
            EventId(8),
            EventDraft::new(EventKind::Voting, "Voting Procedure", ""),
        );
        assert!(closing.is_closing());
        assert!(adjourn.is_closing());
        assert!(!voting.is_closing());
    }
}
