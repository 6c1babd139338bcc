//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use mun_domain::{MajorityMode, OutputFormat, VoteKind};
use std::path::PathBuf;

/// CLI arguments for mun-chair
#[derive(Parser, Debug)]
#[command(name = "mun-chair")]
#[command(author, version, about = "Model UN chair console - votes, motions and the agenda")]
#[command(long_about = r#"
mun-chair runs a committee session from the terminal.

Without a subcommand it opens the interactive chair shell on the session
snapshot (created on first run). The shell evaluates plenary ballots,
queues and resolves floor motions, and edits the agenda; every change is
saved back to the snapshot file.

Configuration files are loaded from (in priority order):
1. --config <path>                        Explicit config file
2. ./mun-chair.toml or ./.mun-chair.toml  Project-level config
3. ~/.config/mun-chair/config.toml        Global config

Example:
  mun-chair
  mun-chair --snapshot gaor.json
  mun-chair tally --yes 10 --no 3 --abstain 2 --mode two-thirds
  mun-chair tally --mode sc --member USA=yes --member RUS=no --member CHN=yes
  mun-chair motions
  mun-chair validate backup.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (full, summary, json)
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Session snapshot file (overrides [session] snapshot)
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Turn off autosave (explicit `save` and `export` still write)
    #[arg(long)]
    pub no_save: bool,

    /// Also write diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive chair shell (default)
    Repl,

    /// Evaluate a single ballot without touching the session
    Tally(TallyArgs),

    /// Print the motion catalog in disruption order
    Motions,

    /// Check a snapshot file without loading it into a session
    Validate {
        /// Snapshot file to check
        file: PathBuf,
    },
}

/// Arguments of `mun-chair tally`
#[derive(Args, Debug, Clone)]
pub struct TallyArgs {
    /// Majority rule (simple, two-thirds, sc, consensus)
    #[arg(short, long, default_value = "simple")]
    pub mode: MajorityMode,

    /// Vote type (substantive, procedural)
    #[arg(long = "type", default_value = "substantive")]
    pub vote_type: VoteKind,

    /// Votes in favour
    #[arg(long, default_value_t = 0)]
    pub yes: i64,

    /// Votes against
    #[arg(long, default_value_t = 0)]
    pub no: i64,

    /// Abstentions
    #[arg(long, default_value_t = 0)]
    pub abstain: i64,

    /// Security Council choice, repeatable (e.g. USA=yes); seats the member
    #[arg(long = "member", value_name = "CODE=CHOICE")]
    pub members: Vec<String>,

    /// Permanent members for Security Council mode (default: USA,CHN,GBR,FRA,RUS)
    #[arg(long, value_name = "CODES", value_delimiter = ',')]
    pub permanent: Option<Vec<String>>,

    /// Affirmative votes required in Security Council mode
    #[arg(long, value_name = "N", default_value_t = 9)]
    pub required_yes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::try_parse_from(["mun-chair"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "mun-chair",
            "-vv",
            "--output",
            "json",
            "--snapshot",
            "gaor.json",
            "--no-save",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.snapshot, Some(PathBuf::from("gaor.json")));
        assert!(cli.no_save);
    }

    #[test]
    fn test_tally_args() {
        let cli = Cli::try_parse_from([
            "mun-chair", "tally", "--mode", "sc", "--member", "USA=yes", "--member", "RUS=no",
            "--permanent", "USA,RUS",
        ])
        .unwrap();
        let Some(Command::Tally(args)) = cli.command else {
            panic!("expected tally");
        };
        assert_eq!(args.mode, MajorityMode::SecurityCouncil);
        assert_eq!(args.members, vec!["USA=yes", "RUS=no"]);
        assert_eq!(args.permanent, Some(vec!["USA".to_string(), "RUS".to_string()]));
        assert_eq!(args.required_yes, 9);
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        assert!(Cli::try_parse_from(["mun-chair", "--output", "xml"]).is_err());
    }

    #[test]
    fn test_validate_requires_file() {
        assert!(Cli::try_parse_from(["mun-chair", "validate"]).is_err());
        let cli = Cli::try_parse_from(["mun-chair", "validate", "a.json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Validate { .. })));
    }
}
