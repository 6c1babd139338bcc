//! Console notification sink
//!
//! Prints the side effects of session operations that the command output
//! itself does not show: events added by a passed motion, voting results
//! that were (or were not) persisted, and autosave failures.

use colored::Colorize;
use mun_application::{SessionNotifier, StoreError};
use mun_domain::{AgendaEvent, EventId, OutputFormat, SaveOutcome, VotingSessionRecord};

pub struct ConsoleNotifier {
    format: OutputFormat,
}

impl ConsoleNotifier {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Line printed for an appended event, or `None` when quiet
    pub fn event_line(&self, event: &AgendaEvent) -> Option<String> {
        match self.format {
            OutputFormat::Json => None,
            _ => Some(format!(
                "{} {} {}",
                "+".green().bold(),
                event.title.bold(),
                format!("(event {}, {})", event.id, event.kind.name()).dimmed()
            )),
        }
    }

    /// Line printed for a saved voting result, or `None` when quiet
    pub fn saved_line(&self, event_id: EventId, outcome: SaveOutcome) -> Option<String> {
        match (self.format, outcome) {
            (OutputFormat::Full, SaveOutcome::Changed) => {
                Some(format!("{}", format!("Result saved for event {}", event_id).dimmed()))
            }
            (OutputFormat::Full, SaveOutcome::Unchanged) => {
                Some(format!("{}", "Result unchanged; nothing saved".dimmed()))
            }
            _ => None,
        }
    }
}

impl SessionNotifier for ConsoleNotifier {
    fn on_event_appended(&self, event: &AgendaEvent) {
        if let Some(line) = self.event_line(event) {
            println!("{}", line);
        }
    }

    fn on_voting_saved(&self, event_id: EventId, _record: &VotingSessionRecord, outcome: SaveOutcome) {
        if let Some(line) = self.saved_line(event_id, outcome) {
            println!("{}", line);
        }
    }

    fn on_autosave_failed(&self, error: &StoreError) {
        eprintln!(
            "{} {} (changes are kept in memory; use `save` to retry)",
            "Autosave failed:".yellow().bold(),
            error
        );
    }
}
