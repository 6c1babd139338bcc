//! Agenda editing on the session

use super::{ChairSession, SessionError};
use crate::ports::clock::Clock;
use crate::ports::snapshot_store::SnapshotStore;
use mun_domain::{
    Agenda, AgendaEvent, Chair, Delegate, Direction, DomainError, EntityKind, EventDraft, EventId,
    EventTimers, SpeechesDefaults, TopicId, TopicList,
};
use tracing::{debug, info};

impl<S: SnapshotStore + 'static, C: Clock + 'static> ChairSession<S, C> {
    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn topics(&self) -> &TopicList {
        &self.topics
    }

    pub fn delegates(&self) -> &[Delegate] {
        &self.delegates
    }

    pub fn chair(&self) -> &Chair {
        &self.chair
    }

    pub fn speeches_defaults(&self) -> &SpeechesDefaults {
        &self.speeches_defaults
    }

    /// Schedule a chair-created event ahead of the closing items
    pub fn add_event(&mut self, draft: EventDraft) -> Result<EventId, SessionError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::validation("Event title must not be empty").into());
        }
        if let Some(topic) = draft.topic_id
            && !self.topics.contains(topic)
        {
            return Err(DomainError::not_found(EntityKind::Topic, topic).into());
        }

        let id = self.agenda.insert_scheduled(draft);
        if let Some(event) = self.agenda.get(id) {
            info!("Event {} '{}' scheduled", id, event.title);
            self.notifier.on_event_appended(event);
        }
        self.autosave();
        Ok(id)
    }

    pub fn add_topic(&mut self, title: &str) -> Result<TopicId, SessionError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("Topic title must not be empty").into());
        }
        let id = self.topics.add(title);
        info!("Topic {} '{}' added", id, title);
        self.autosave();
        Ok(id)
    }

    /// Move an event one step; false when it is already at that edge
    pub fn move_event(&mut self, index: usize, direction: Direction) -> bool {
        let moved = self.agenda.move_event(index, direction);
        if moved {
            self.autosave();
        }
        moved
    }

    pub fn move_topic(&mut self, index: usize, direction: Direction) -> bool {
        let moved = self.topics.move_topic(index, direction);
        if moved {
            self.autosave();
        }
        moved
    }

    pub fn current_event(&self) -> Option<&AgendaEvent> {
        self.agenda.current()
    }

    /// Make the event at `index` (zero-based) current
    pub fn set_current_event(&mut self, index: usize) -> Result<&AgendaEvent, SessionError> {
        let event = self.agenda.set_current(index)?;
        debug!("Current event is now {} '{}'", event.id, event.title);
        Ok(event)
    }

    /// Step forward (`true`) or back through the agenda
    pub fn step_event(&mut self, forward: bool) -> Result<&AgendaEvent, SessionError> {
        let current = self.agenda.current_index().unwrap_or_default();
        let target = if forward {
            current + 1
        } else {
            current.checked_sub(1).ok_or_else(|| {
                DomainError::InvalidState {
                    operation: "go back",
                    state: "at the first event",
                }
            })?
        };
        self.set_current_event(target)
    }

    /// Set the generic timer of an event; 0 removes it
    pub fn set_event_timer(&mut self, event_id: EventId, seconds: u32) -> Result<(), SessionError> {
        self.agenda.set_timer(event_id, seconds)?;
        info!("Timer of event {} set to {}s", event_id, seconds);
        self.autosave();
        Ok(())
    }

    /// Countdowns for the current event
    pub fn current_timers(&self) -> EventTimers {
        self.agenda
            .current()
            .map(EventTimers::for_event)
            .unwrap_or_default()
    }
}
