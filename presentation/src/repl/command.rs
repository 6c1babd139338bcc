//! Chair shell command parsing
//!
//! Lines are split into words (double quotes group words), the first word
//! selects the command. Durations accept plain seconds (`90`) or `MM:SS`.

use crate::cli::tally::parse_member_choice;
use mun_domain::{
    DelegateCode, Direction, EventDraft, EventKind, MajorityMode, MemberChoice, MotionId,
    MotionParameters, QueueId, TopicId, VoteKind,
};

/// Countdown command of the `timer` family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    Show,
    /// Start one clock, or both when `None`
    Start(Option<crate::timer::TimerSlot>),
    Pause,
    Reset,
    /// Set (0 clears) the generic timer of the current event
    Set(u32),
}

/// Floor-motion command of the `motion` family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionAction {
    List,
    Catalog,
    Submit(MotionId, MotionParameters),
    Withdraw(QueueId),
    Clear,
    Vote(QueueId),
    Ballot { yes: i64, no: i64, abstain: i64 },
    Finalize,
    /// `confirmed` is set once the chair answered the confirmation prompt
    Cancel { confirmed: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    Status,

    // Agenda
    Agenda,
    Topics,
    Goto(usize),
    Next,
    Prev,
    AddEvent(EventDraft),
    MoveEvent(usize, Direction),
    AddTopic(String),
    MoveTopic(usize, Direction),

    // Plenary voting
    Config,
    Mode(MajorityMode),
    VoteType(VoteKind),
    Council {
        members: Vec<DelegateCode>,
        permanent: Option<Vec<DelegateCode>>,
        required_yes: Option<u32>,
    },
    Tally { yes: i64, no: i64, abstain: i64 },
    MemberVote(Vec<(DelegateCode, MemberChoice)>),
    Result,
    Resume,

    Motion(MotionAction),
    Timer(TimerAction),

    // Persistence
    Save,
    Export(Option<String>),
    Import(String),
}

/// Split a line into words; `"..."` keeps spaces inside one word
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }

    if in_quotes {
        return Err("Unterminated quote".to_string());
    }
    if has_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse seconds from `90`, `1:30` or `1:00:00`
pub fn parse_seconds(input: &str) -> Result<u32, String> {
    let invalid = || format!("Invalid duration: '{}' (use seconds or MM:SS)", input);
    let mut total: u32 = 0;
    for (i, part) in input.trim().split(':').enumerate() {
        if i > 2 {
            return Err(invalid());
        }
        let value: u32 = part.parse().map_err(|_| invalid())?;
        if i > 0 && value >= 60 {
            return Err(invalid());
        }
        total = total
            .checked_mul(60)
            .and_then(|t| t.checked_add(value))
            .ok_or_else(invalid)?;
    }
    Ok(total)
}

fn parse_count(input: &str) -> Result<i64, String> {
    input
        .parse()
        .map_err(|_| format!("Invalid vote count: '{}'", input))
}

/// 1-based position as typed by the chair, converted to an index
fn parse_position(input: &str) -> Result<usize, String> {
    match input.trim_start_matches('#').parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Invalid position: '{}' (positions start at 1)", input)),
    }
}

fn parse_codes(input: &str) -> Vec<DelegateCode> {
    input
        .split(',')
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| DelegateCode::new(c.to_uppercase()))
        .collect()
}

fn arg<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a str, String> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("Usage: {}", usage))
}

fn counts(args: &[String], usage: &str) -> Result<(i64, i64, i64), String> {
    if args.len() < 2 || args.len() > 3 {
        return Err(format!("Usage: {}", usage));
    }
    let abstain = match args.get(2) {
        Some(a) => parse_count(a)?,
        None => 0,
    };
    Ok((parse_count(&args[0])?, parse_count(&args[1])?, abstain))
}

/// Split trailing `key=value` words off the remaining words
fn split_options(args: &[String]) -> (Vec<(String, String)>, Vec<String>) {
    let mut options = Vec::new();
    let mut rest = Vec::new();
    for word in args {
        match word.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                options.push((key.to_lowercase(), value.to_string()))
            }
            _ => rest.push(word.clone()),
        }
    }
    (options, rest)
}

fn parse_topic(value: &str) -> Result<TopicId, String> {
    value.parse::<TopicId>()
}

fn parse_add_event(args: &[String]) -> Result<EventDraft, String> {
    const USAGE: &str = "add <general|voting|moderated TOTAL SPEAKER|unmoderated DURATION|speeches TOTAL SPEAKER> <title> [topic=N] [timer=SECS] [subtitle=TEXT]";
    let kind_name = arg(args, 0, USAGE)?.to_lowercase();
    let (options, rest) = split_options(&args[1..]);

    let (kind, title_words) = match kind_name.as_str() {
        "general" => (EventKind::General, &rest[..]),
        "voting" => (EventKind::Voting, &rest[..]),
        "unmoderated" | "unmod" => {
            let duration = parse_seconds(arg(&rest, 0, USAGE)?)?;
            (EventKind::Unmoderated { duration }, &rest[1..])
        }
        "moderated" | "mod" | "speeches" => {
            let total_time = parse_seconds(arg(&rest, 0, USAGE)?)?;
            let speaker_time = parse_seconds(arg(&rest, 1, USAGE)?)?;
            let kind = if kind_name == "speeches" {
                EventKind::Speeches {
                    speech_subject: None,
                    total_time,
                    speaker_time,
                }
            } else {
                EventKind::Moderated {
                    total_time,
                    speaker_time,
                }
            };
            (kind, &rest[2..])
        }
        other => return Err(format!("Unknown event type: '{}'. Usage: {}", other, USAGE)),
    };

    let mut draft = EventDraft::new(kind, title_words.join(" "), "");
    for (key, value) in options {
        match key.as_str() {
            "topic" => draft = draft.with_topic(Some(parse_topic(&value)?)),
            "timer" => draft = draft.with_timer(parse_seconds(&value)?),
            "subtitle" => draft.subtitle = value,
            "subject" => {
                if let EventKind::Speeches { speech_subject, .. } = &mut draft.kind {
                    *speech_subject = Some(value);
                }
            }
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }
    Ok(draft)
}

fn parse_submit(args: &[String]) -> Result<MotionAction, String> {
    const USAGE: &str = "motion submit <motion> [total=T] [speaker=T] [duration=T] [timer=T] [topic=N] [title=TEXT] [subtitle=TEXT]";
    let motion_id: MotionId = arg(args, 0, USAGE)?.parse()?;
    let (options, rest) = split_options(&args[1..]);
    if let Some(word) = rest.first() {
        return Err(format!("Unexpected '{}'. Usage: {}", word, USAGE));
    }

    let mut parameters = MotionParameters::new();
    for (key, value) in options {
        parameters = match key.as_str() {
            "total" | "total_time" => parameters.with_total_time(parse_seconds(&value)?),
            "speaker" | "speaker_time" => parameters.with_speaker_time(parse_seconds(&value)?),
            "duration" => parameters.with_duration(parse_seconds(&value)?),
            "timer" => parameters.with_timer(parse_seconds(&value)?),
            "topic" => parameters.with_topic(parse_topic(&value)?),
            "title" => parameters.with_title(value),
            "subtitle" => parameters.with_subtitle(value),
            other => return Err(format!("Unknown motion parameter '{}'", other)),
        };
    }
    Ok(MotionAction::Submit(motion_id, parameters))
}

fn parse_queue_id(args: &[String], usage: &str) -> Result<QueueId, String> {
    arg(args, 0, usage)?.parse::<QueueId>()
}

fn parse_motion(args: &[String]) -> Result<MotionAction, String> {
    let Some(action) = args.first() else {
        return Ok(MotionAction::List);
    };
    let rest = &args[1..];
    match action.to_lowercase().as_str() {
        "list" | "ls" => Ok(MotionAction::List),
        "catalog" => Ok(MotionAction::Catalog),
        "submit" | "raise" => parse_submit(rest),
        "withdraw" => Ok(MotionAction::Withdraw(parse_queue_id(rest, "motion withdraw <#>")?)),
        "clear" => Ok(MotionAction::Clear),
        "vote" => Ok(MotionAction::Vote(parse_queue_id(rest, "motion vote <#>")?)),
        "ballot" => {
            let (yes, no, abstain) = counts(rest, "motion ballot <yes> <no> [abstain]")?;
            Ok(MotionAction::Ballot { yes, no, abstain })
        }
        "finalize" | "resolve" => Ok(MotionAction::Finalize),
        "cancel" => Ok(MotionAction::Cancel { confirmed: false }),
        other => Err(format!("Unknown motion command: '{}'", other)),
    }
}

fn parse_timer(args: &[String]) -> Result<TimerAction, String> {
    use crate::timer::TimerSlot;

    let Some(action) = args.first() else {
        return Ok(TimerAction::Show);
    };
    match action.to_lowercase().as_str() {
        "show" => Ok(TimerAction::Show),
        "start" => match args.get(1).map(|s| s.to_lowercase()).as_deref() {
            None => Ok(TimerAction::Start(None)),
            Some("total") => Ok(TimerAction::Start(Some(TimerSlot::Total))),
            Some("speaker") => Ok(TimerAction::Start(Some(TimerSlot::Speaker))),
            Some(other) => Err(format!("Unknown timer '{}'. Valid: total, speaker", other)),
        },
        "pause" | "stop" => Ok(TimerAction::Pause),
        "reset" => Ok(TimerAction::Reset),
        "set" => Ok(TimerAction::Set(parse_seconds(arg(args, 1, "timer set <seconds>")?)?)),
        other => Err(format!("Unknown timer command: '{}'", other)),
    }
}

fn parse_direction(input: &str) -> Result<Direction, String> {
    input.parse()
}

impl std::str::FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = tokenize(line)?;
        let Some((head, args)) = words.split_first() else {
            return Err("Empty command".to_string());
        };

        match head.to_lowercase().as_str() {
            "help" | "h" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            "status" => Ok(ReplCommand::Status),

            "agenda" | "ls" => Ok(ReplCommand::Agenda),
            "topics" => Ok(ReplCommand::Topics),
            "goto" => Ok(ReplCommand::Goto(parse_position(arg(args, 0, "goto <n>")?)?)),
            "next" => Ok(ReplCommand::Next),
            "prev" | "back" => Ok(ReplCommand::Prev),
            "add" => Ok(ReplCommand::AddEvent(parse_add_event(args)?)),
            "move" => {
                const USAGE: &str = "move <n> <up|down>";
                Ok(ReplCommand::MoveEvent(
                    parse_position(arg(args, 0, USAGE)?)?,
                    parse_direction(arg(args, 1, USAGE)?)?,
                ))
            }
            "topic" => match args.first().map(|s| s.to_lowercase()).as_deref() {
                Some("add") if args.len() > 1 => Ok(ReplCommand::AddTopic(args[1..].join(" "))),
                Some("move") => {
                    const USAGE: &str = "topic move <n> <up|down>";
                    Ok(ReplCommand::MoveTopic(
                        parse_position(arg(args, 1, USAGE)?)?,
                        parse_direction(arg(args, 2, USAGE)?)?,
                    ))
                }
                None => Ok(ReplCommand::Topics),
                _ => Err("Usage: topic add <title> | topic move <n> <up|down>".to_string()),
            },

            "config" => Ok(ReplCommand::Config),
            "mode" => Ok(ReplCommand::Mode(arg(args, 0, "mode <simple|two-thirds|sc|consensus>")?.parse()?)),
            "type" => Ok(ReplCommand::VoteType(arg(args, 0, "type <substantive|procedural>")?.parse()?)),
            "council" => {
                const USAGE: &str = "council <CODE,CODE,...> [p5=CODE,...] [required=N]";
                let (options, rest) = split_options(args);
                let members = parse_codes(&rest.join(","));
                if members.is_empty() {
                    return Err(format!("Usage: {}", USAGE));
                }
                let mut permanent = None;
                let mut required_yes = None;
                for (key, value) in options {
                    match key.as_str() {
                        "p5" | "permanent" => permanent = Some(parse_codes(&value)),
                        "required" | "required_yes" => {
                            required_yes = Some(
                                value
                                    .parse()
                                    .map_err(|_| format!("Invalid required yes: '{}'", value))?,
                            )
                        }
                        other => return Err(format!("Unknown option '{}'", other)),
                    }
                }
                Ok(ReplCommand::Council {
                    members,
                    permanent,
                    required_yes,
                })
            }
            "tally" => {
                let (yes, no, abstain) = counts(args, "tally <yes> <no> [abstain]")?;
                Ok(ReplCommand::Tally { yes, no, abstain })
            }
            "vote" => {
                if args.is_empty() {
                    return Err("Usage: vote CODE=yes|no|abstain ...".to_string());
                }
                let choices = args
                    .iter()
                    .map(|a| parse_member_choice(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ReplCommand::MemberVote(choices))
            }
            "result" => Ok(ReplCommand::Result),
            "resume" => Ok(ReplCommand::Resume),

            "motion" | "m" => Ok(ReplCommand::Motion(parse_motion(args)?)),
            "motions" => Ok(ReplCommand::Motion(MotionAction::List)),
            "catalog" => Ok(ReplCommand::Motion(MotionAction::Catalog)),
            "timer" | "t" => Ok(ReplCommand::Timer(parse_timer(args)?)),

            "save" => Ok(ReplCommand::Save),
            "export" => Ok(ReplCommand::Export(args.first().cloned())),
            "import" => Ok(ReplCommand::Import(arg(args, 0, "import <file>")?.to_string())),

            other => Err(format!("Unknown command: '{}'. Type 'help' for commands", other)),
        }
    }
}
