//! CLI entrypoint for mun-chair
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use mun_application::{
    ChairSession, CompositeSessionNotifier, SessionNotifier, SessionParams, SnapshotStore,
};
use mun_domain::config::has_errors;
use mun_domain::{Chair, ConfigIssue, OutputFormat, SessionSnapshot, evaluate};
use mun_infrastructure::{
    ConfigLoader, FileConfig, JsonFileSnapshotStore, JsonlSessionJournal, SystemClock,
};
use mun_presentation::{
    ChairRepl, ChairShell, Cli, Command, ConsoleFormatter, ConsoleNotifier, OutputConfig,
    ReplConfig, TallyArgs,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    // Handle --show-config
    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    report_issues(&config.validate())?;

    let output = output_config(&cli, &config);
    if !output.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Some(Command::Motions) => {
            println!("{}", ConsoleFormatter::catalog(output.format));
            Ok(())
        }
        Some(Command::Tally(args)) => run_tally(args, output.format),
        Some(Command::Validate { file }) => run_validate(file),
        Some(Command::Repl) | None => run_repl(&cli, &config, output).await,
    }
}

/// Console logging filtered by `-v`, plus an optional log file
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        if issue.is_error() {
            eprintln!("config error: {}", issue.message);
        } else {
            eprintln!("config warning: {}", issue.message);
        }
    }
    if has_errors(issues) {
        bail!("Invalid configuration");
    }
    Ok(())
}

fn output_config(cli: &Cli, config: &FileConfig) -> OutputConfig {
    let (thresholds, _) = config.timer.to_thresholds();
    OutputConfig {
        format: cli
            .output
            .or(config.output.format)
            .unwrap_or(OutputFormat::Full),
        color: config.output.color && !cli.no_color,
        thresholds,
    }
}

fn repl_config(config: &FileConfig) -> ReplConfig {
    ReplConfig {
        confirm_cancel: config.repl.confirm_cancel,
        history_file: config.repl.history_file.as_ref().map(PathBuf::from),
        export_dir: config
            .session
            .export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

fn run_tally(args: &TallyArgs, format: OutputFormat) -> Result<()> {
    let (rule, ballot) = args.to_ballot()?;
    let verdict = evaluate(&rule, &ballot)?;
    println!("{}", ConsoleFormatter::verdict(format, &verdict, &rule));
    Ok(())
}

fn run_validate(file: &Path) -> Result<()> {
    let snapshot = JsonFileSnapshotStore::read_file(file)?;
    println!(
        "{} is valid: {} events, {} topics, {} delegates, {} saved votes",
        file.display(),
        snapshot.events.len(),
        snapshot.topics.len(),
        snapshot.delegates.len(),
        snapshot.voting_results.len()
    );
    Ok(())
}

async fn run_repl(cli: &Cli, config: &FileConfig, output: OutputConfig) -> Result<()> {
    let path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.session.snapshot));
    let store = Arc::new(JsonFileSnapshotStore::new(path));

    let snapshot = match store.load()? {
        Some(snapshot) => {
            info!("Loaded session from {}", store.describe());
            snapshot
        }
        None => {
            info!("Starting a new session at {}", store.describe());
            let mut snapshot = SessionSnapshot::new(vec![], vec![], vec![], Chair::default());
            let (voting_config, _) = config.voting.to_rule_config();
            snapshot.voting_config = voting_config;
            snapshot
        }
    };

    // === Dependency Injection ===
    let console: Arc<dyn SessionNotifier> = Arc::new(ConsoleNotifier::new(output.format));
    let mut notifier = CompositeSessionNotifier::new(vec![console]);
    if let Some(journal) = &config.session.journal {
        match JsonlSessionJournal::new(journal) {
            Some(journal) => notifier = notifier.with(Arc::new(journal)),
            None => warn!("Session journal {} could not be opened", journal),
        }
    }

    let params = SessionParams::default().with_autosave(config.session.autosave && !cli.no_save);
    let session = ChairSession::new(snapshot, store, Arc::new(SystemClock))
        .with_notifier(Arc::new(notifier))
        .with_params(params);

    let shell = ChairShell::new(session, output, repl_config(config));
    ChairRepl::new(shell).run().await?;
    Ok(())
}
