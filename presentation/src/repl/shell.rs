//! Command execution for the chair shell
//!
//! [`ChairShell`] turns parsed [`ReplCommand`]s into [`ChairSession`] calls
//! and renders the results. It does no terminal I/O of its own, so the
//! whole command surface is testable without a terminal.

use super::command::{MotionAction, ReplCommand, TimerAction};
use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use crate::timer::{SharedTimers, TimerSlot};
use colored::Colorize;
use mun_application::{ChairSession, Clock, SessionError, SnapshotStore};
use mun_domain::{
    Ballot, BallotCounts, DelegateCode, DomainError, EventId, EventTimers, MemberChoice,
    WorkflowState,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// What the shell wants the terminal to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    /// Ask a yes/no question; run `command` on yes
    Confirm {
        question: String,
        command: ReplCommand,
    },
    Quit,
}

pub struct ChairShell<S: SnapshotStore + 'static, C: Clock + 'static> {
    session: ChairSession<S, C>,
    timers: SharedTimers,
    output: OutputConfig,
    repl: ReplConfig,
}

impl<S: SnapshotStore + 'static, C: Clock + 'static> ChairShell<S, C> {
    pub fn new(session: ChairSession<S, C>, output: OutputConfig, repl: ReplConfig) -> Self {
        let timers = Arc::new(Mutex::new(session.current_timers()));
        Self {
            session,
            timers,
            output,
            repl,
        }
    }

    pub fn session(&self) -> &ChairSession<S, C> {
        &self.session
    }

    pub fn repl_config(&self) -> &ReplConfig {
        &self.repl
    }

    /// Countdowns of the current event, shared with the timer driver
    pub fn timers(&self) -> SharedTimers {
        Arc::clone(&self.timers)
    }

    /// Prompt text, e.g. `mun [3/7]`
    pub fn prompt(&self) -> String {
        let agenda = self.session.agenda();
        let floor = if self.session.floor_state().is_idle() {
            ""
        } else {
            " vote"
        };
        match agenda.current_index() {
            Some(index) => format!("mun [{}/{}]{}", index + 1, agenda.len(), floor),
            None => format!("mun{}", floor),
        }
    }

    pub fn execute(&mut self, command: ReplCommand) -> Result<Reply, SessionError> {
        let text = match command {
            ReplCommand::Help => help_text(),
            ReplCommand::Quit => return Ok(Reply::Quit),
            ReplCommand::Status => self.status(),

            ReplCommand::Agenda => {
                ConsoleFormatter::agenda(self.session.agenda(), self.session.topics())
            }
            ReplCommand::Topics => ConsoleFormatter::topics(self.session.topics()),
            ReplCommand::Goto(index) => {
                self.session.set_current_event(index)?;
                self.current_changed()
            }
            ReplCommand::Next => {
                self.session.step_event(true)?;
                self.current_changed()
            }
            ReplCommand::Prev => {
                self.session.step_event(false)?;
                self.current_changed()
            }
            ReplCommand::AddEvent(draft) => {
                let title = draft.title.clone();
                let id = self.session.add_event(draft)?;
                format!("Added '{}' as event {}", title, id)
            }
            ReplCommand::MoveEvent(index, direction) => {
                if self.session.move_event(index, direction) {
                    ConsoleFormatter::agenda(self.session.agenda(), self.session.topics())
                } else {
                    "Nothing to move.".to_string()
                }
            }
            ReplCommand::AddTopic(title) => {
                let id = self.session.add_topic(&title)?;
                format!("Added topic {} '{}'", id, title.trim())
            }
            ReplCommand::MoveTopic(index, direction) => {
                if self.session.move_topic(index, direction) {
                    ConsoleFormatter::topics(self.session.topics())
                } else {
                    "Nothing to move.".to_string()
                }
            }

            ReplCommand::Config => ConsoleFormatter::voting_config(self.session.voting_config()),
            ReplCommand::Mode(mode) => {
                self.session.set_majority_mode(mode);
                ConsoleFormatter::voting_config(self.session.voting_config())
            }
            ReplCommand::VoteType(kind) => {
                self.session.set_vote_kind(kind);
                ConsoleFormatter::voting_config(self.session.voting_config())
            }
            ReplCommand::Council {
                members,
                permanent,
                required_yes,
            } => {
                let current = &self.session.voting_config().security_council;
                let permanent = permanent.unwrap_or_else(|| current.permanent_members.clone());
                let required_yes = required_yes.unwrap_or(current.required_yes);
                self.session
                    .configure_security_council(members, permanent, required_yes)?;
                ConsoleFormatter::voting_config(self.session.voting_config())
            }
            ReplCommand::Tally { yes, no, abstain } => {
                let counts = BallotCounts::from_raw(yes, no, abstain)?;
                self.plenary_vote(Ballot::Counts(counts))?
            }
            ReplCommand::MemberVote(choices) => {
                let ballot = self.member_ballot(choices)?;
                self.plenary_vote(ballot)?
            }
            ReplCommand::Result => match self.current_voting_event() {
                Some(id) => match self.session.voting_result(id) {
                    Some(record) => ConsoleFormatter::voting_record(record),
                    None => "No saved result for this event.".to_string(),
                },
                None => "The current event is not a voting event.".to_string(),
            },
            ReplCommand::Resume => {
                let id = self.current_voting_event().ok_or_else(not_voting_event)?;
                match self.session.resume_voting(id) {
                    Some(record) => format!(
                        "{}{}",
                        ConsoleFormatter::voting_config(self.session.voting_config()),
                        ConsoleFormatter::voting_record(&record)
                    ),
                    None => "No saved result for this event.".to_string(),
                }
            }

            ReplCommand::Motion(action) => match self.motion(action)? {
                MotionReply::Text(text) => text,
                MotionReply::Confirm(question) => {
                    return Ok(Reply::Confirm {
                        question,
                        command: ReplCommand::Motion(MotionAction::Cancel { confirmed: true }),
                    });
                }
            },
            ReplCommand::Timer(action) => self.timer(action)?,

            ReplCommand::Save => {
                self.session.persist()?;
                format!("Saved to {}", self.session.store().describe())
            }
            ReplCommand::Export(dir) => {
                let dir = dir.map(PathBuf::from).unwrap_or_else(|| self.repl.export_dir.clone());
                let path = self.session.export_to(&dir)?;
                format!("Exported to {}", path.display())
            }
            ReplCommand::Import(file) => {
                let json = std::fs::read_to_string(&file).map_err(|e| {
                    DomainError::validation(format!("Cannot read {}: {}", file, e))
                })?;
                self.session.import_snapshot(&json)?;
                self.reload_timers();
                format!(
                    "Imported {}: {} events, {} topics",
                    file,
                    self.session.agenda().len(),
                    self.session.topics().topics().len()
                )
            }
        };
        Ok(Reply::Output(text))
    }

    fn status(&self) -> String {
        let session = &self.session;
        let mut output = format!("{} {}\n", "Chair:".cyan().bold(), session.chair().name);
        match session.current_event() {
            Some(event) => output.push_str(&format!(
                "{} {} ({} of {})\n",
                "Current:".cyan().bold(),
                event.title,
                session.agenda().current_index().map_or(0, |i| i + 1),
                session.agenda().len()
            )),
            None => output.push_str(&format!("{} agenda is empty\n", "Current:".cyan().bold())),
        }
        output.push_str(&format!(
            "{} {} ({})\n",
            "Voting:".cyan().bold(),
            session.voting_config().mode,
            session.voting_config().vote_kind
        ));
        output.push_str(&format!(
            "{} {} pending, floor {}\n",
            "Motions:".cyan().bold(),
            session.ordered_motions().len(),
            session.floor_state().name()
        ));
        output
    }

    fn current_changed(&self) -> String {
        self.reload_timers();
        match self.session.current_event() {
            Some(event) => format!("{} {}", "▶".yellow().bold(), event.title.bold()),
            None => "The agenda is empty.".to_string(),
        }
    }

    fn current_voting_event(&self) -> Option<EventId> {
        self.session
            .current_event()
            .filter(|e| e.kind.is_voting())
            .map(|e| e.id)
    }

    /// Stored per-member ballot of the current event (or a fresh one) with the choices applied
    fn member_ballot(&self, choices: Vec<(DelegateCode, MemberChoice)>) -> Result<Ballot, SessionError> {
        let stored = self
            .current_voting_event()
            .and_then(|id| self.session.voting_result(id))
            .filter(|r| r.mode == self.session.voting_config().mode)
            .map(|r| r.ballot.clone());

        let Ballot::Members(mut members) = stored.unwrap_or_else(|| self.session.empty_ballot()) else {
            return Err(DomainError::validation(format!(
                "{} takes aggregate counts; use 'tally <yes> <no> [abstain]'",
                self.session.voting_config().mode
            ))
            .into());
        };
        for (code, choice) in choices {
            members.set(code, choice);
        }
        Ok(Ballot::Members(members))
    }

    /// Evaluate a plenary ballot and keep it when the current event is a vote
    fn plenary_vote(&mut self, ballot: Ballot) -> Result<String, SessionError> {
        let verdict = self.session.evaluate_plenary(&ballot)?;
        if let Some(id) = self.current_voting_event() {
            self.session.save_voting_result(id, ballot)?;
        }
        Ok(ConsoleFormatter::verdict(
            self.output.format,
            &verdict,
            self.session.voting_config(),
        ))
    }

    fn queue_text(&self) -> String {
        ConsoleFormatter::queue(
            self.output.format,
            &self.session.ordered_motions().to_vec(),
            self.session.floor_state(),
        )
    }

    fn motion(&mut self, action: MotionAction) -> Result<MotionReply, SessionError> {
        let text = match action {
            MotionAction::List => self.queue_text(),
            MotionAction::Catalog => ConsoleFormatter::catalog(self.output.format),
            MotionAction::Submit(motion_id, parameters) => {
                let id = self.session.submit_motion(motion_id, parameters)?;
                format!("Submitted as #{}\n{}", id, self.queue_text())
            }
            MotionAction::Withdraw(id) => {
                if self.session.withdraw_motion(id)? {
                    format!("Withdrew #{}\n{}", id, self.queue_text())
                } else {
                    format!("No motion #{} is pending.", id)
                }
            }
            MotionAction::Clear => {
                let cleared = self.session.clear_motions();
                format!("Cleared {} motion(s).", cleared)
            }
            MotionAction::Vote(id) => {
                let motion = self.session.begin_voting(id)?;
                format!(
                    "Voting on {}\nRecord with 'motion ballot <yes> <no> [abstain]', then 'motion finalize'.",
                    ConsoleFormatter::motion_line(&motion)
                )
            }
            MotionAction::Ballot { yes, no, abstain } => {
                let counts = self.session.record_floor_ballot(yes, no, abstain)?;
                format!(
                    "Recorded {} yes / {} no / {} abstain.",
                    counts.for_votes, counts.against, counts.abstain
                )
            }
            MotionAction::Finalize => {
                let resolution = self.session.finalize_motion()?;
                ConsoleFormatter::resolution(self.output.format, &resolution)
            }
            MotionAction::Cancel { confirmed } => {
                if let WorkflowState::AwaitingBallot { motion, .. } = self.session.floor_state()
                    && self.repl.confirm_cancel
                    && !confirmed
                {
                    return Ok(MotionReply::Confirm(format!(
                        "Cancel the vote on #{}? [y/N] ",
                        motion.queue_id
                    )));
                }
                let motion = self.session.cancel_motion()?;
                format!("Vote on #{} cancelled; the motion stays queued.", motion.queue_id)
            }
        };
        Ok(MotionReply::Text(text))
    }

    fn timer(&mut self, action: TimerAction) -> Result<String, SessionError> {
        let text = match action {
            TimerAction::Show => self.render_timers(),
            TimerAction::Start(slot) => {
                let started = {
                    let mut timers = self.lock_timers();
                    let mut started = false;
                    if slot != Some(TimerSlot::Speaker)
                        && let Some(total) = timers.total.as_mut()
                    {
                        started |= total.start();
                    }
                    if slot != Some(TimerSlot::Total)
                        && let Some(speaker) = timers.speaker.as_mut()
                    {
                        started |= speaker.start();
                    }
                    started
                };
                if started {
                    self.render_timers()
                } else {
                    "Nothing to start.".to_string()
                }
            }
            TimerAction::Pause => {
                for_each_countdown(&mut self.lock_timers(), |c| c.pause());
                self.render_timers()
            }
            TimerAction::Reset => {
                for_each_countdown(&mut self.lock_timers(), |c| c.reset());
                self.render_timers()
            }
            TimerAction::Set(seconds) => {
                let id = self
                    .session
                    .current_event()
                    .map(|e| e.id)
                    .ok_or_else(|| DomainError::validation("The agenda is empty"))?;
                self.session.set_event_timer(id, seconds)?;
                self.reload_timers();
                self.render_timers()
            }
        };
        Ok(text)
    }

    fn render_timers(&self) -> String {
        ConsoleFormatter::timers(&self.lock_timers(), &self.output.thresholds)
    }

    fn reload_timers(&self) {
        *self.lock_timers() = self.session.current_timers();
    }

    fn lock_timers(&self) -> MutexGuard<'_, EventTimers> {
        self.timers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

enum MotionReply {
    Text(String),
    Confirm(String),
}

fn for_each_countdown(timers: &mut EventTimers, f: impl Fn(&mut mun_domain::Countdown)) {
    timers.total.iter_mut().chain(timers.speaker.iter_mut()).for_each(f);
}

fn not_voting_event() -> SessionError {
    DomainError::validation("The current event is not a voting event").into()
}

pub fn help_text() -> String {
    let mut output = String::new();
    let sections: [(&str, &[(&str, &str)]); 5] = [
        (
            "Agenda",
            &[
                ("agenda | topics | status", "Show the agenda, topics or session status"),
                ("goto <n> | next | prev", "Change the current event"),
                ("add <type> [times] <title> [topic=N]", "Add an event before the closing items"),
                ("move <n> up|down", "Reorder an event"),
                ("topic add <title> | topic move <n> up|down", "Edit topics"),
            ],
        ),
        (
            "Plenary voting",
            &[
                ("config", "Show the voting configuration"),
                ("mode <simple|two-thirds|sc|consensus>", "Set the majority rule"),
                ("type <substantive|procedural>", "Set the vote type"),
                ("council <CODES> [p5=CODES] [required=N]", "Seat the Security Council"),
                ("tally <yes> <no> [abstain]", "Evaluate (and save on a voting event)"),
                ("vote CODE=yes|no|abstain ...", "Security Council roll call"),
                ("result | resume", "Show or reopen the saved result"),
            ],
        ),
        (
            "Motions",
            &[
                ("motions | catalog", "Show the queue or the catalog"),
                ("motion submit <motion> [key=value ...]", "Raise a motion"),
                ("motion withdraw <#> | motion clear", "Remove motions"),
                ("motion vote <#>", "Put a motion to the vote"),
                ("motion ballot <yes> <no> [abstain]", "Record the floor ballot"),
                ("motion finalize | motion cancel", "Resolve or abandon the vote"),
            ],
        ),
        (
            "Timers",
            &[
                ("timer [show]", "Show the current event's clocks"),
                ("timer start [total|speaker] | pause | reset", "Run the clocks"),
                ("timer set <seconds|MM:SS>", "Set the event's generic timer"),
            ],
        ),
        (
            "Session",
            &[
                ("save | export [dir] | import <file>", "Persist, copy or replace the session"),
                ("help | quit", "This help, leave the shell"),
            ],
        ),
    ];

    for (title, commands) in sections {
        output.push_str(&format!("\n{}\n", title.cyan().bold()));
        for (usage, description) in commands {
            output.push_str(&format!("  {:<46} {}\n", usage, description.dimmed()));
        }
    }
    output
}
