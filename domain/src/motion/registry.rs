//! Motion catalog
//!
//! Static definitions of every motion a delegate may raise. Lower disruption
//! rank means more disruptive, and more disruptive motions are voted on first:
//!
//! ```text
//! 1  suspension / adjournment of the meeting
//! 2  unmoderated caucus
//! 3  moderated caucus
//! 4  introduction of a document
//! 5  closure of debate
//! 6  setting / changing the agenda
//! 7  extension of speaking time
//! ```

use crate::agenda::entities::{EventDraft, EventKind, EventType};
use crate::core::error::DomainError;
use crate::core::ids::TopicId;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionId {
    SuspendMeeting,
    AdjournMeeting,
    UnmoderatedCaucus,
    ModeratedCaucus,
    IntroduceDocument,
    CloseDebate,
    SetAgenda,
    ExtendTime,
}

impl MotionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionId::SuspendMeeting => "suspend_meeting",
            MotionId::AdjournMeeting => "adjourn_meeting",
            MotionId::UnmoderatedCaucus => "unmoderated_caucus",
            MotionId::ModeratedCaucus => "moderated_caucus",
            MotionId::IntroduceDocument => "introduce_document",
            MotionId::CloseDebate => "close_debate",
            MotionId::SetAgenda => "set_agenda",
            MotionId::ExtendTime => "extend_time",
        }
    }

    /// Catalog entry for this motion
    pub fn motion(&self) -> &'static Motion {
        // CATALOG is declared in variant order
        &CATALOG[*self as usize]
    }
}

impl std::fmt::Display for MotionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MotionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "suspend_meeting" | "suspend" | "suspension" => Ok(MotionId::SuspendMeeting),
            "adjourn_meeting" | "adjourn" | "adjournment" => Ok(MotionId::AdjournMeeting),
            "unmoderated_caucus" | "unmod" | "unmoderated" => Ok(MotionId::UnmoderatedCaucus),
            "moderated_caucus" | "mod" | "moderated" => Ok(MotionId::ModeratedCaucus),
            "introduce_document" | "introduce" | "document" => Ok(MotionId::IntroduceDocument),
            "close_debate" | "closure" | "close" => Ok(MotionId::CloseDebate),
            "set_agenda" | "agenda" => Ok(MotionId::SetAgenda),
            "extend_time" | "extend" | "yield" => Ok(MotionId::ExtendTime),
            _ => Err(format!("Unknown motion: {}", s)),
        }
    }
}

/// Parameter a motion collects when it is raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterName {
    /// Total caucus time in seconds
    TotalTime,
    /// Per-speaker time in seconds
    SpeakerTime,
    /// Unmoderated caucus duration in seconds
    Duration,
    /// Generic countdown in seconds
    Timer,
    /// Topic the resulting event discusses (may be left unset)
    Topic,
}

impl ParameterName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterName::TotalTime => "totalTime",
            ParameterName::SpeakerTime => "speakerTime",
            ParameterName::Duration => "duration",
            ParameterName::Timer => "timer",
            ParameterName::Topic => "topic",
        }
    }
}

impl std::fmt::Display for ParameterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Values collected for a submitted motion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<TopicId>,
    /// Overrides the catalog's default event title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Overrides the catalog's default event subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl MotionParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_total_time(mut self, seconds: u32) -> Self {
        self.total_time = Some(seconds);
        self
    }

    pub fn with_speaker_time(mut self, seconds: u32) -> Self {
        self.speaker_time = Some(seconds);
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_timer(mut self, seconds: u32) -> Self {
        self.timer = Some(seconds);
        self
    }

    pub fn with_topic(mut self, topic: TopicId) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    fn seconds(&self, name: ParameterName) -> Option<u32> {
        match name {
            ParameterName::TotalTime => self.total_time,
            ParameterName::SpeakerTime => self.speaker_time,
            ParameterName::Duration => self.duration,
            ParameterName::Timer => self.timer,
            ParameterName::Topic => None,
        }
    }
}

/// Catalog entry describing one kind of motion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Motion {
    pub id: MotionId,
    pub title: &'static str,
    /// 1 = most disruptive, voted on first
    pub disruption_rank: u8,
    pub resulting_event: EventType,
    /// Parameters collected on submission, in prompt order
    pub parameters: &'static [ParameterName],
    pub default_title: &'static str,
    pub default_subtitle: &'static str,
}

/// Every motion the chair may entertain, in [`MotionId`] declaration order
pub static CATALOG: [Motion; 8] = [
    Motion {
        id: MotionId::SuspendMeeting,
        title: "Motion to Suspend the Meeting",
        disruption_rank: 1,
        resulting_event: EventType::General,
        parameters: &[ParameterName::Timer],
        default_title: "Suspension of the Meeting",
        default_subtitle: "Recess",
    },
    Motion {
        id: MotionId::AdjournMeeting,
        title: "Motion to Adjourn the Meeting",
        disruption_rank: 1,
        resulting_event: EventType::General,
        parameters: &[],
        default_title: "Adjournment",
        default_subtitle: "Meeting adjourned",
    },
    Motion {
        id: MotionId::UnmoderatedCaucus,
        title: "Motion for an Unmoderated Caucus",
        disruption_rank: 2,
        resulting_event: EventType::Unmoderated,
        parameters: &[ParameterName::Duration, ParameterName::Topic],
        default_title: "Unmoderated Caucus",
        default_subtitle: "Informal Discussion",
    },
    Motion {
        id: MotionId::ModeratedCaucus,
        title: "Motion for a Moderated Caucus",
        disruption_rank: 3,
        resulting_event: EventType::Moderated,
        parameters: &[
            ParameterName::TotalTime,
            ParameterName::SpeakerTime,
            ParameterName::Topic,
        ],
        default_title: "Moderated Caucus",
        default_subtitle: "Moderated Discussion",
    },
    Motion {
        id: MotionId::IntroduceDocument,
        title: "Motion to Introduce a Document",
        disruption_rank: 4,
        resulting_event: EventType::General,
        parameters: &[ParameterName::Timer, ParameterName::Topic],
        default_title: "Introduction of Draft Resolution",
        default_subtitle: "Presentation by the sponsors",
    },
    Motion {
        id: MotionId::CloseDebate,
        title: "Motion to Close Debate",
        disruption_rank: 5,
        resulting_event: EventType::Voting,
        parameters: &[ParameterName::Topic],
        default_title: "Voting Procedure",
        default_subtitle: "Closure of Debate",
    },
    Motion {
        id: MotionId::SetAgenda,
        title: "Motion to Set the Agenda",
        disruption_rank: 6,
        resulting_event: EventType::General,
        parameters: &[ParameterName::Topic],
        default_title: "Setting the Agenda",
        default_subtitle: "Agenda adopted",
    },
    Motion {
        id: MotionId::ExtendTime,
        title: "Motion to Extend Speaking Time",
        disruption_rank: 7,
        resulting_event: EventType::General,
        parameters: &[ParameterName::Timer],
        default_title: "Extension of Time",
        default_subtitle: "Extended speaking time",
    },
];

/// Look up a motion by its identifier string
pub fn find_motion(id: &str) -> Option<&'static Motion> {
    id.parse::<MotionId>().ok().map(|id| id.motion())
}

impl Motion {
    pub fn declares(&self, name: ParameterName) -> bool {
        self.parameters.contains(&name)
    }

    /// Check that every declared timing parameter was supplied and positive
    pub fn validate_parameters(&self, parameters: &MotionParameters) -> Result<(), DomainError> {
        for name in self.parameters {
            if *name == ParameterName::Topic {
                continue;
            }
            match parameters.seconds(*name) {
                None => {
                    return Err(DomainError::validation(format!(
                        "{} requires '{}'",
                        self.title, name
                    )));
                }
                Some(0) => {
                    return Err(DomainError::validation(format!(
                        "{}: '{}' must be a positive number of seconds",
                        self.title, name
                    )));
                }
                Some(_) => {}
            }
        }

        if let Some(speaker) = parameters.speaker_time
            && let Some(total) = parameters.total_time
            && self.declares(ParameterName::SpeakerTime)
            && speaker > total
        {
            return Err(DomainError::validation(format!(
                "Speaker time ({speaker}s) cannot exceed total time ({total}s)"
            )));
        }

        Ok(())
    }

    /// Type-specific tiebreak inside a disruption rank
    ///
    /// Moderated caucuses with shorter speaking time come first; every other
    /// motion has no secondary key.
    pub fn secondary_key(&self, parameters: &MotionParameters) -> u32 {
        match self.id {
            MotionId::ModeratedCaucus => parameters.speaker_time.unwrap_or(u32::MAX),
            _ => 0,
        }
    }

    /// Build the agenda event a passed motion creates
    ///
    /// Custom title/subtitle override the defaults; timing fields and topic
    /// are only taken from parameters this motion declares.
    pub fn materialize(&self, parameters: &MotionParameters) -> EventDraft {
        let seconds = |name| {
            if self.declares(name) {
                parameters.seconds(name).unwrap_or_default()
            } else {
                0
            }
        };

        let kind = match self.resulting_event {
            EventType::Moderated => EventKind::Moderated {
                total_time: seconds(ParameterName::TotalTime),
                speaker_time: seconds(ParameterName::SpeakerTime),
            },
            EventType::Unmoderated => EventKind::Unmoderated {
                duration: seconds(ParameterName::Duration),
            },
            EventType::Speeches => EventKind::Speeches {
                speech_subject: None,
                total_time: seconds(ParameterName::TotalTime),
                speaker_time: seconds(ParameterName::SpeakerTime),
            },
            EventType::Voting => EventKind::Voting,
            EventType::General => EventKind::General,
        };

        let title = non_blank(parameters.title.as_deref()).unwrap_or(self.default_title);
        let subtitle = non_blank(parameters.subtitle.as_deref()).unwrap_or(self.default_subtitle);

        let topic = if self.declares(ParameterName::Topic) {
            parameters.topic
        } else {
            None
        };

        let mut draft = EventDraft::new(kind, title, subtitle).with_topic(topic);
        if self.declares(ParameterName::Timer)
            && let Some(timer) = parameters.timer
        {
            draft = draft.with_timer(timer);
        }
        draft
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_in_declaration_order() {
        for (index, motion) in CATALOG.iter().enumerate() {
            assert_eq!(motion.id as usize, index);
            assert_eq!(motion.id.motion().id, motion.id);
        }
    }

    #[test]
    fn test_disruption_ranks() {
        let rank = |id: MotionId| id.motion().disruption_rank;
        assert_eq!(rank(MotionId::SuspendMeeting), 1);
        assert_eq!(rank(MotionId::AdjournMeeting), 1);
        assert_eq!(rank(MotionId::UnmoderatedCaucus), 2);
        assert_eq!(rank(MotionId::ModeratedCaucus), 3);
        assert_eq!(rank(MotionId::IntroduceDocument), 4);
        assert_eq!(rank(MotionId::CloseDebate), 5);
        assert_eq!(rank(MotionId::SetAgenda), 6);
        assert_eq!(rank(MotionId::ExtendTime), 7);
    }

    #[test]
    fn test_find_motion() {
        assert_eq!(find_motion("moderated_caucus").unwrap().id, MotionId::ModeratedCaucus);
        assert_eq!(find_motion("unmod").unwrap().id, MotionId::UnmoderatedCaucus);
        assert_eq!(find_motion("close-debate").unwrap().id, MotionId::CloseDebate);
        assert!(find_motion("filibuster").is_none());
    }

    #[test]
    fn test_validate_parameters_requires_declared_times() {
        let moderated = MotionId::ModeratedCaucus.motion();
        assert!(moderated.validate_parameters(&MotionParameters::new()).is_err());

        let params = MotionParameters::new().with_total_time(600).with_speaker_time(60);
        assert!(moderated.validate_parameters(&params).is_ok());

        let zero = MotionParameters::new().with_total_time(600).with_speaker_time(0);
        assert!(moderated.validate_parameters(&zero).is_err());

        let inverted = MotionParameters::new().with_total_time(30).with_speaker_time(60);
        assert!(moderated.validate_parameters(&inverted).is_err());
    }

    #[test]
    fn test_topic_is_optional() {
        let close = MotionId::CloseDebate.motion();
        assert!(close.validate_parameters(&MotionParameters::new()).is_ok());
    }

    #[test]
    fn test_materialize_moderated_caucus() {
        let params = MotionParameters::new()
            .with_total_time(600)
            .with_speaker_time(45)
            .with_topic(TopicId(2));
        let draft = MotionId::ModeratedCaucus.motion().materialize(&params);

        assert_eq!(
            draft.kind,
            EventKind::Moderated {
                total_time: 600,
                speaker_time: 45
            }
        );
        assert_eq!(draft.title, "Moderated Caucus");
        assert_eq!(draft.subtitle, "Moderated Discussion");
        assert_eq!(draft.topic_id, Some(TopicId(2)));
        assert_eq!(draft.timer, None);
    }

    #[test]
    fn test_materialize_custom_title_overrides_default() {
        let params = MotionParameters::new()
            .with_duration(300)
            .with_title("Bloc Formation")
            .with_subtitle("   ");
        let draft = MotionId::UnmoderatedCaucus.motion().materialize(&params);

        assert_eq!(draft.kind, EventKind::Unmoderated { duration: 300 });
        assert_eq!(draft.title, "Bloc Formation");
        assert_eq!(draft.subtitle, "Informal Discussion");
    }

    #[test]
    fn test_materialize_ignores_undeclared_parameters() {
        let params = MotionParameters::new()
            .with_timer(900)
            .with_topic(TopicId(1))
            .with_duration(60);
        let draft = MotionId::SuspendMeeting.motion().materialize(&params);

        assert_eq!(draft.kind, EventKind::General);
        assert_eq!(draft.timer, Some(900));
        assert_eq!(draft.topic_id, None);
    }

    #[test]
    fn test_close_debate_creates_voting_event() {
        let draft = MotionId::CloseDebate
            .motion()
            .materialize(&MotionParameters::new().with_topic(TopicId(3)));
        assert!(draft.kind.is_voting());
        assert_eq!(draft.topic_id, Some(TopicId(3)));
    }

    #[test]
    fn test_secondary_key() {
        let params = MotionParameters::new().with_speaker_time(30);
        assert_eq!(MotionId::ModeratedCaucus.motion().secondary_key(&params), 30);
        assert_eq!(MotionId::ExtendTime.motion().secondary_key(&params), 0);
    }
}
