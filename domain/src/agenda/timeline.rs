//! Ordered agenda with a current-event cursor

use super::entities::{AgendaEvent, EventDraft, Topic};
use crate::core::error::{DomainError, EntityKind};
use crate::core::ids::{EventId, TopicId};

/// Direction for reordering agenda items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn target(&self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Up => index.checked_sub(1),
            Direction::Down => (index + 1 < len).then_some(index + 1),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "-1" => Ok(Direction::Up),
            "down" | "+1" | "1" => Ok(Direction::Down),
            _ => Err(format!("Unknown direction: {}. Valid: up, down", s)),
        }
    }
}

/// The ordered list of events the chair steps through
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agenda {
    events: Vec<AgendaEvent>,
    current: usize,
}

impl Agenda {
    pub fn new(events: Vec<AgendaEvent>) -> Self {
        Self { events, current: 0 }
    }

    pub fn events(&self) -> &[AgendaEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<AgendaEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&AgendaEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }

    /// Id the next event will receive
    pub fn next_id(&self) -> EventId {
        self.events
            .iter()
            .map(|e| e.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(EventId(1))
    }

    /// Append an event at the end of the agenda
    pub fn append(&mut self, draft: EventDraft) -> EventId {
        let id = self.next_id();
        self.events.push(AgendaEvent::from_draft(id, draft));
        id
    }

    /// Insert an event ahead of the closing items
    ///
    /// The event lands before the first closing/adjournment event, or at the
    /// end when there is none. The cursor keeps pointing at the same event.
    pub fn insert_scheduled(&mut self, draft: EventDraft) -> EventId {
        let id = self.next_id();
        let event = AgendaEvent::from_draft(id, draft);

        match self.events.iter().position(AgendaEvent::is_closing) {
            Some(closing) => {
                self.events.insert(closing, event);
                if self.current >= closing {
                    self.current += 1;
                }
            }
            None => self.events.push(event),
        }
        id
    }

    /// Swap the event at `index` with its neighbour
    ///
    /// Returns false (and changes nothing) when the move would leave the list.
    pub fn move_event(&mut self, index: usize, direction: Direction) -> bool {
        if index >= self.events.len() {
            return false;
        }
        let Some(target) = direction.target(index, self.events.len()) else {
            return false;
        };

        self.events.swap(index, target);
        if self.current == index {
            self.current = target;
        } else if self.current == target {
            self.current = index;
        }
        true
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.events.is_empty()).then_some(self.current)
    }

    pub fn current(&self) -> Option<&AgendaEvent> {
        self.events.get(self.current)
    }

    pub fn set_current(&mut self, index: usize) -> Result<&AgendaEvent, DomainError> {
        if index >= self.events.len() {
            return Err(DomainError::not_found(
                EntityKind::Event,
                format!("#{}", index + 1),
            ));
        }
        self.current = index;
        Ok(&self.events[index])
    }

    /// Set (or clear, with 0) the generic timer of an event
    pub fn set_timer(&mut self, id: EventId, seconds: u32) -> Result<(), DomainError> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| DomainError::not_found(EntityKind::Event, id))?;
        event.timer = (seconds > 0).then_some(seconds);
        Ok(())
    }
}

/// Ordered list of agenda topics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicList {
    topics: Vec<Topic>,
}

impl TopicList {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn into_topics(self) -> Vec<Topic> {
        self.topics
    }

    pub fn get(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TopicId) -> bool {
        self.get(id).is_some()
    }

    pub fn add(&mut self, title: impl Into<String>) -> TopicId {
        let id = self
            .topics
            .iter()
            .map(|t| t.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(TopicId(1));
        self.topics.push(Topic {
            id,
            title: title.into(),
        });
        id
    }

    pub fn move_topic(&mut self, index: usize, direction: Direction) -> bool {
        if index >= self.topics.len() {
            return false;
        }
        match direction.target(index, self.topics.len()) {
            Some(target) => {
                self.topics.swap(index, target);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::entities::EventKind;

    fn draft(title: &str) -> EventDraft {
        EventDraft::new(EventKind::General, title, "")
    }

    fn agenda(titles: &[&str]) -> Agenda {
        let mut agenda = Agenda::default();
        for title in titles {
            agenda.append(draft(title));
        }
        agenda
    }

    fn titles(agenda: &Agenda) -> Vec<&str> {
        agenda.events().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let mut agenda = Agenda::default();
        assert_eq!(agenda.append(draft("A")), EventId(1));
        assert_eq!(agenda.append(draft("B")), EventId(2));
        assert_eq!(agenda.next_id(), EventId(3));
    }

    #[test]
    fn test_next_id_follows_max_not_len() {
        let mut agenda = Agenda::new(vec![AgendaEvent::from_draft(EventId(40), draft("A"))]);
        assert_eq!(agenda.append(draft("B")), EventId(41));
    }

    #[test]
    fn test_insert_scheduled_before_closing() {
        let mut agenda = agenda(&["Opening", "Caucus", "Closing Remarks"]);
        agenda.set_current(2).unwrap();

        agenda.insert_scheduled(draft("Voting"));

        assert_eq!(titles(&agenda), vec!["Opening", "Caucus", "Voting", "Closing Remarks"]);
        assert_eq!(agenda.current().unwrap().title, "Closing Remarks");
    }

    #[test]
    fn test_insert_scheduled_keeps_earlier_cursor() {
        let mut agenda = agenda(&["Opening", "Closing Remarks"]);
        agenda.insert_scheduled(draft("Caucus"));
        assert_eq!(agenda.current_index(), Some(0));
        assert_eq!(titles(&agenda), vec!["Opening", "Caucus", "Closing Remarks"]);
    }

    #[test]
    fn test_insert_scheduled_without_closing_appends() {
        let mut agenda = agenda(&["Opening"]);
        agenda.insert_scheduled(draft("Caucus"));
        assert_eq!(titles(&agenda), vec!["Opening", "Caucus"]);
    }

    #[test]
    fn test_move_event_tracks_cursor() {
        let mut agenda = agenda(&["A", "B", "C"]);
        agenda.set_current(1).unwrap();

        assert!(agenda.move_event(1, Direction::Up));
        assert_eq!(titles(&agenda), vec!["B", "A", "C"]);
        assert_eq!(agenda.current().unwrap().title, "B");

        assert!(agenda.move_event(1, Direction::Up));
        assert_eq!(titles(&agenda), vec!["A", "B", "C"]);
        assert_eq!(agenda.current().unwrap().title, "B");
    }

    #[test]
    fn test_move_event_out_of_range_is_noop() {
        let mut agenda = agenda(&["A", "B"]);
        assert!(!agenda.move_event(0, Direction::Up));
        assert!(!agenda.move_event(1, Direction::Down));
        assert!(!agenda.move_event(5, Direction::Down));
        assert_eq!(titles(&agenda), vec!["A", "B"]);
    }

    #[test]
    fn test_set_current_out_of_range() {
        let mut agenda = agenda(&["A"]);
        assert!(matches!(
            agenda.set_current(3),
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(agenda.current_index(), Some(0));
    }

    #[test]
    fn test_set_timer() {
        let mut agenda = agenda(&["A"]);
        agenda.set_timer(EventId(1), 120).unwrap();
        assert_eq!(agenda.get(EventId(1)).unwrap().timer, Some(120));
        agenda.set_timer(EventId(1), 0).unwrap();
        assert_eq!(agenda.get(EventId(1)).unwrap().timer, None);
        assert!(agenda.set_timer(EventId(9), 10).is_err());
    }

    #[test]
    fn test_topics() {
        let mut topics = TopicList::default();
        let first = topics.add("Climate");
        let second = topics.add("Disarmament");
        assert_eq!(first, TopicId(1));
        assert_eq!(second, TopicId(2));

        assert!(topics.move_topic(1, Direction::Up));
        assert_eq!(topics.topics()[0].title, "Disarmament");
        assert!(!topics.move_topic(0, Direction::Up));
        assert!(topics.contains(TopicId(2)));
    }
}
