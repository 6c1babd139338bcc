//! Console output formatter for session results

use colored::{ColoredString, Colorize};
use mun_domain::motion::CATALOG;
use mun_domain::timer::format_clock;
use mun_domain::{
    Agenda, Ballot, Countdown, EventKind, EventTimers, MajorityMode, MajorityRuleConfig,
    MotionParameters, OutputFormat, QueuedMotion, Resolution, TopicList, Urgency,
    UrgencyThresholds, Verdict, VoteOutcome, VotingSessionRecord, WorkflowState,
};
use serde::Serialize;

/// Formats session results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a plenary verdict in the requested format
    pub fn verdict(format: OutputFormat, verdict: &Verdict, config: &MajorityRuleConfig) -> String {
        match format {
            OutputFormat::Full => Self::format_verdict(verdict, config),
            OutputFormat::Summary => Self::verdict_line(verdict),
            OutputFormat::Json => Self::format_json(verdict),
        }
    }

    /// Render a motion resolution in the requested format
    pub fn resolution(format: OutputFormat, resolution: &Resolution) -> String {
        match format {
            OutputFormat::Full => Self::format_resolution(resolution),
            OutputFormat::Summary => Self::resolution_line(resolution),
            OutputFormat::Json => Self::format_json(resolution),
        }
    }

    /// Render the motion queue in floor order
    pub fn queue(format: OutputFormat, ordered: &[QueuedMotion], floor: &WorkflowState) -> String {
        if format == OutputFormat::Json {
            return Self::format_json(&ordered);
        }

        let mut output = String::new();
        if format == OutputFormat::Full {
            output.push_str(&Self::section_header("Motions on the Floor"));
        }
        if ordered.is_empty() {
            output.push_str(&format!("{}\n", "No motions pending.".dimmed()));
            return output;
        }

        let voting_on = match floor {
            WorkflowState::AwaitingBallot { motion, .. } => Some(motion.queue_id),
            WorkflowState::Idle => None,
        };
        for (position, motion) in ordered.iter().enumerate() {
            let marker = if Some(motion.queue_id) == voting_on {
                "▶".yellow().bold()
            } else {
                " ".normal()
            };
            output.push_str(&format!(
                "{} {:>2}. {}\n",
                marker,
                position + 1,
                Self::motion_line(motion)
            ));
        }
        if let WorkflowState::AwaitingBallot { ballot, .. } = floor {
            output.push_str(&format!(
                "\n{} {}\n",
                "Voting:".cyan().bold(),
                if ballot.is_empty() {
                    "awaiting ballot".to_string()
                } else {
                    format!(
                        "{} yes / {} no / {} abstain recorded",
                        ballot.for_votes, ballot.against, ballot.abstain
                    )
                }
            ));
        }
        output
    }

    /// One line per queued motion, e.g. `#3 Motion for a Moderated Caucus (10:00, 01:00 each)`
    pub fn motion_line(motion: &QueuedMotion) -> String {
        let details = Self::parameter_summary(&motion.parameters);
        let title = motion.motion().title.bold();
        if details.is_empty() {
            format!("#{} {}", motion.queue_id, title)
        } else {
            format!("#{} {} ({})", motion.queue_id, title, details)
        }
    }

    fn parameter_summary(parameters: &MotionParameters) -> String {
        let mut parts = Vec::new();
        match (parameters.total_time, parameters.speaker_time) {
            (Some(total), Some(speaker)) => parts.push(format!(
                "{}, {} each",
                format_clock(total),
                format_clock(speaker)
            )),
            (Some(total), None) => parts.push(format_clock(total)),
            _ => {}
        }
        if let Some(duration) = parameters.duration {
            parts.push(format_clock(duration));
        }
        if let Some(timer) = parameters.timer {
            parts.push(format_clock(timer));
        }
        if let Some(topic) = parameters.topic {
            parts.push(format!("topic {}", topic));
        }
        if let Some(title) = &parameters.title {
            parts.push(format!("\"{}\"", title));
        }
        parts.join(", ")
    }

    fn format_verdict(verdict: &Verdict, config: &MajorityRuleConfig) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Vote Result"));
        output.push('\n');
        output.push_str(&format!(
            "{} {} ({})\n",
            "Rule:".cyan().bold(),
            config.mode,
            config.vote_kind
        ));
        output.push_str(&format!(
            "{} {} yes / {} no / {} abstain\n",
            "Tally:".cyan().bold(),
            verdict.tally.for_votes,
            verdict.tally.against,
            verdict.tally.abstain
        ));
        if let Some(required) = verdict.required {
            output.push_str(&format!(
                "{} {} affirmative votes\n",
                "Required:".cyan().bold(),
                required
            ));
        }
        if config.mode == MajorityMode::SecurityCouncil {
            output.push_str(&format!(
                "{} {}\n",
                "Permanent members:".cyan().bold(),
                config
                    .security_council
                    .permanent_members
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        output.push_str(&format!("\n{}\n", Self::outcome_badge(verdict)));
        output.push_str(&Self::footer());
        output
    }

    fn verdict_line(verdict: &Verdict) -> String {
        format!(
            "{} ({}/{}/{})",
            Self::outcome_badge(verdict),
            verdict.tally.for_votes,
            verdict.tally.against,
            verdict.tally.abstain
        )
    }

    fn outcome_badge(verdict: &Verdict) -> ColoredString {
        let headline = verdict.headline();
        match verdict.outcome {
            VoteOutcome::Passed => headline.green().bold(),
            VoteOutcome::Tie => headline.yellow().bold(),
            VoteOutcome::Failed => headline.red().bold(),
        }
    }

    fn format_resolution(resolution: &Resolution) -> String {
        let mut output = String::new();
        let outcome = if resolution.is_passed() {
            "PASSED".green().bold()
        } else {
            "FAILED".red().bold()
        };
        output.push_str(&format!(
            "{} {}\n",
            outcome,
            Self::motion_line(&resolution.motion)
        ));
        output.push_str(&format!(
            "  {} yes / {} no / {} abstain, {} required\n",
            resolution.tally.for_votes,
            resolution.tally.against,
            resolution.tally.abstain,
            resolution.required
        ));
        if let Some(event) = resolution.created_event {
            output.push_str(&format!("  {} event {}\n", "Added".green(), event));
        }
        if !resolution.discarded.is_empty() {
            output.push_str(&format!(
                "  {} {}\n",
                "Cleared:".dimmed(),
                resolution
                    .discarded
                    .iter()
                    .map(|id| format!("#{}", id))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        output
    }

    fn resolution_line(resolution: &Resolution) -> String {
        format!(
            "#{} {} {} ({}/{})",
            resolution.motion.queue_id,
            resolution.motion.motion_id,
            if resolution.is_passed() {
                "passed".green()
            } else {
                "failed".red()
            },
            resolution.tally.for_votes,
            resolution.tally.against
        )
    }

    /// The motion catalog in disruption order
    pub fn catalog(format: OutputFormat) -> String {
        let mut motions: Vec<_> = CATALOG.iter().collect();
        motions.sort_by_key(|m| m.disruption_rank);

        if format == OutputFormat::Json {
            return Self::format_json(&motions);
        }

        let mut output = String::new();
        if format == OutputFormat::Full {
            output.push_str(&Self::section_header("Motion Catalog"));
        }
        for motion in motions {
            let parameters = motion
                .parameters
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            output.push_str(&format!(
                "  {} {:<20} {}",
                motion.disruption_rank.to_string().yellow(),
                motion.id.as_str().cyan(),
                motion.title
            ));
            if format == OutputFormat::Full && !parameters.is_empty() {
                output.push_str(&format!(" {}", format!("[{}]", parameters).dimmed()));
            }
            output.push('\n');
        }
        output
    }

    /// The agenda with the current event marked
    pub fn agenda(agenda: &Agenda, topics: &TopicList) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Agenda"));
        if agenda.is_empty() {
            output.push_str(&format!("{}\n", "The agenda is empty.".dimmed()));
            return output;
        }

        let current = agenda.current_index();
        for (index, event) in agenda.events().iter().enumerate() {
            let marker = if Some(index) == current {
                "▶".yellow().bold()
            } else {
                " ".normal()
            };
            let mut line = format!(
                "{} {:>2}. {} {}",
                marker,
                index + 1,
                event.title.bold(),
                format!("[{}]", Self::event_details(&event.kind)).dimmed()
            );
            if let Some(topic) = event.topic_id.and_then(|id| topics.get(id)) {
                line.push_str(&format!(" {}", topic.title.cyan()));
            }
            if let Some(timer) = event.timer {
                line.push_str(&format!(" ⏱ {}", format_clock(timer)));
            }
            output.push_str(&line);
            output.push('\n');
            if !event.subtitle.is_empty() {
                output.push_str(&format!("       {}\n", event.subtitle.dimmed()));
            }
        }
        output
    }

    fn event_details(kind: &EventKind) -> String {
        match kind {
            EventKind::Moderated {
                total_time,
                speaker_time,
            }
            | EventKind::Speeches {
                total_time,
                speaker_time,
                ..
            } => format!(
                "{} {}/{}",
                kind.name(),
                format_clock(*total_time),
                format_clock(*speaker_time)
            ),
            EventKind::Unmoderated { duration } => {
                format!("{} {}", kind.name(), format_clock(*duration))
            }
            EventKind::General | EventKind::Voting => kind.name().to_string(),
        }
    }

    /// Topics in agenda order
    pub fn topics(topics: &TopicList) -> String {
        let mut output = Self::section_header("Topics");
        if topics.topics().is_empty() {
            output.push_str(&format!("{}\n", "No topics.".dimmed()));
        }
        for (index, topic) in topics.topics().iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {} {}\n",
                index + 1,
                topic.title,
                format!("(id {})", topic.id).dimmed()
            ));
        }
        output
    }

    /// Current plenary voting configuration
    pub fn voting_config(config: &MajorityRuleConfig) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Majority:".cyan().bold(), config.mode));
        output.push_str(&format!(
            "{} {}\n",
            "Vote type:".cyan().bold(),
            config.vote_kind
        ));
        if config.mode == MajorityMode::SecurityCouncil {
            let council = &config.security_council;
            let members = council
                .members
                .iter()
                .map(|code| {
                    if council.is_permanent(code) {
                        format!("{}*", code)
                    } else {
                        code.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            output.push_str(&format!("{} {}\n", "Council:".cyan().bold(), members));
            output.push_str(&format!(
                "{} {} yes votes, permanent members (*) hold a veto\n",
                "Required:".cyan().bold(),
                council.required_yes
            ));
        }
        output
    }

    /// A stored voting result
    pub fn voting_record(record: &VotingSessionRecord) -> String {
        let ballot = match &record.ballot {
            Ballot::Counts(counts) => format!(
                "{} yes / {} no / {} abstain",
                counts.for_votes, counts.against, counts.abstain
            ),
            Ballot::Members(members) => members
                .iter()
                .map(|(code, choice)| format!("{}={}", code, choice))
                .collect::<Vec<_>>()
                .join(" "),
        };
        format!(
            "{} {} ({})\n{} {}\n",
            "Rule:".cyan().bold(),
            record.mode,
            record.vote_kind,
            "Ballot:".cyan().bold(),
            ballot
        )
    }

    /// Countdown clocks colored by urgency
    pub fn timers(timers: &EventTimers, thresholds: &UrgencyThresholds) -> String {
        if timers.is_empty() {
            return format!("{}\n", "No timers for this event.".dimmed());
        }
        let mut output = String::new();
        for (label, countdown) in [("Total", &timers.total), ("Speaker", &timers.speaker)] {
            if let Some(countdown) = countdown {
                output.push_str(&format!(
                    "{:<8} {}\n",
                    label,
                    Self::countdown(countdown, thresholds)
                ));
            }
        }
        output
    }

    fn countdown(countdown: &Countdown, thresholds: &UrgencyThresholds) -> String {
        let clock = format!(
            "{} / {}",
            format_clock(countdown.remaining()),
            format_clock(countdown.initial())
        );
        let clock = match countdown.urgency(thresholds) {
            Urgency::Normal => clock.green(),
            Urgency::Warning => clock.yellow(),
            Urgency::Danger => clock.red().bold(),
        };
        let state = if countdown.is_expired() {
            "expired".red()
        } else if countdown.is_running() {
            "running".normal()
        } else {
            "paused".dimmed()
        };
        format!("{} {}", clock, state)
    }

    /// Format any serializable result as JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
