//! Agenda domain
//!
//! The ordered list of events the chair steps through, plus the topics,
//! delegates and chair they refer to.

pub mod entities;
pub mod timeline;

pub use entities::{AgendaEvent, Chair, Delegate, EventDraft, EventKind, EventType, Topic};
pub use timeline::{Agenda, Direction, TopicList};
