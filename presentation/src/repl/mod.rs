//! Interactive chair shell
//!
//! ```text
//! reedline ──▶ ReplCommand::from_str ──▶ ChairShell::execute ──▶ Reply
//!                                              │
//!                              SharedTimers ◀──┴──▶ TimerDriver (1 Hz)
//! ```

pub mod command;
pub mod shell;

pub use command::{MotionAction, ReplCommand, TimerAction};
pub use shell::{ChairShell, Reply};

use crate::timer::{TimerDriver, TimerSink, TimerSlot};
use colored::Colorize;
use mun_application::{Clock, SessionError, SnapshotStore};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Prints countdown expirations above the prompt
struct ConsoleTimerSink;

impl TimerSink for ConsoleTimerSink {
    fn on_expired(&self, slot: TimerSlot) {
        println!("\n{} {} time has expired", "⏰".yellow(), slot);
    }
}

/// Line-editing loop around a [`ChairShell`]
pub struct ChairRepl<S: SnapshotStore + 'static, C: Clock + 'static> {
    shell: ChairShell<S, C>,
}

impl<S: SnapshotStore + 'static, C: Clock + 'static> ChairRepl<S, C> {
    pub fn new(shell: ChairShell<S, C>) -> Self {
        Self { shell }
    }

    /// Run until `quit`, Ctrl-D, or a terminal error
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let driver = TimerDriver::spawn(self.shell.timers(), Arc::new(ConsoleTimerSink));

        self.print_welcome();

        loop {
            let prompt = DefaultPrompt::new(
                DefaultPromptSegment::Basic(self.shell.prompt()),
                DefaultPromptSegment::Empty,
            );
            let line = match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => line,
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(_) => break,
                Err(e) => {
                    driver.shutdown().await;
                    return Err(e);
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let command = match line.parse::<ReplCommand>() {
                Ok(command) => command,
                Err(e) => {
                    println!("{} {}", "Error:".red().bold(), e);
                    continue;
                }
            };

            match self.shell.execute(command) {
                Ok(Reply::Output(text)) => println!("{}", text.trim_end()),
                Ok(Reply::Quit) => break,
                Ok(Reply::Confirm { question, command }) => {
                    if confirm(&mut editor, &question) {
                        self.run_confirmed(command);
                    } else {
                        println!("{}", "Kept.".dimmed());
                    }
                }
                Err(e) => print_error(&e),
            }
        }

        driver.shutdown().await;
        let session = self.shell.session();
        if session.params().autosave
            && let Err(e) = session.persist()
        {
            warn!("Final save failed: {}", e);
        }
        println!("Adjourned.");
        Ok(())
    }

    fn run_confirmed(&mut self, command: ReplCommand) {
        match self.shell.execute(command) {
            Ok(Reply::Output(text)) => println!("{}", text.trim_end()),
            Ok(_) => {}
            Err(e) => print_error(&e),
        }
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.shell.repl_config().history_path() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => {
                debug!("History file: {}", path.display());
                editor.with_history(Box::new(history))
            }
            Err(e) => {
                warn!("History disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    fn print_welcome(&self) {
        let session = self.shell.session();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            MUN Chair - Session Shell        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Chair: {}  Events: {}  Topics: {}",
            session.chair().name,
            session.agenda().len(),
            session.topics().topics().len()
        );
        if let Some(event) = session.current_event() {
            println!("Current: {}", event.title.bold());
        }
        println!("Type 'help' for commands, 'quit' to leave.");
        println!();
    }
}

fn confirm(editor: &mut Reedline, question: &str) -> bool {
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(question.trim_end().to_string()),
        DefaultPromptSegment::Empty,
    );
    matches!(
        editor.read_line(&prompt),
        Ok(Signal::Success(answer)) if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    )
}

fn print_error(error: &SessionError) {
    println!("{} {}", "Error:".red().bold(), error);
}
