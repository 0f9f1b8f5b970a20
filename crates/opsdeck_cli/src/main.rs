//! Ops Deck command-line entry point.
//!
//! # Responsibility
//! - Wire a local folder store and config into the core dashboard service.
//! - Print results as JSON; report declined operations on stderr.

use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use opsdeck_core::{
    default_log_level, init_logging, parse_inbox, parse_roadmap_with, parse_task_file,
    DeckConfig, DeckService, LineRef, LocalFolderStore, Revision,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "opsdeck", version, about = "Markdown-backed productivity dashboard")]
struct Cli {
    /// Folder used as the document store.
    #[arg(long, env = "OPSDECK_ROOT", default_value = ".")]
    root: PathBuf,

    /// TOML config file overriding document names.
    #[arg(long, env = "OPSDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "OPSDECK_LOG_DIR")]
    log_dir: Option<String>,

    #[arg(long, env = "OPSDECK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the full dashboard summary.
    Summary,
    /// Inbox notes.
    Inbox {
        #[command(subcommand)]
        action: InboxAction,
    },
    /// Toggle one checkbox line of a store document.
    Toggle {
        file_id: String,
        line_number: usize,
        /// Reject the toggle unless the document is still at this revision.
        #[arg(long)]
        revision: Option<String>,
    },
    /// Parse a local markdown file without touching the store.
    Parse { kind: DocumentKind, path: PathBuf },
}

#[derive(Debug, Subcommand)]
enum InboxAction {
    List,
    Add { text: Vec<String> },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DocumentKind {
    Roadmap,
    Inbox,
    Tasks,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("event=cli_failed module=cli status=error reason={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| err.to_string())?;
    }

    let config = match &cli.config {
        Some(path) => DeckConfig::load(path).map_err(|err| err.to_string())?,
        None => DeckConfig::default(),
    };

    let service = DeckService::new(LocalFolderStore::new(&cli.root), config);
    match cli.command {
        Command::Summary => to_json(&service.summary().map_err(|err| err.to_string())?),
        Command::Inbox {
            action: InboxAction::List,
        } => to_json(&service.inbox().map_err(|err| err.to_string())?),
        Command::Inbox {
            action: InboxAction::Add { text },
        } => {
            let today = chrono::Utc::now().date_naive();
            service
                .add_inbox(&text.join(" "), today)
                .map_err(|err| err.to_string())?;
            to_json(&serde_json::json!({ "ok": true }))
        }
        Command::Toggle {
            file_id,
            line_number,
            revision,
        } => {
            let line_ref = match revision {
                Some(raw) => LineRef::pinned(line_number, Revision::from_raw(raw)),
                None => LineRef::unpinned(line_number),
            };
            let outcome = service
                .toggle_task(&file_id, &line_ref)
                .map_err(|err| err.to_string())?;
            to_json(&serde_json::json!({
                "ok": true,
                "done": outcome.done,
                "lineNumber": outcome.line_number,
                "revision": outcome.revision,
            }))
        }
        Command::Parse { kind, path } => {
            let text = std::fs::read_to_string(&path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            match kind {
                DocumentKind::Roadmap => {
                    to_json(&parse_roadmap_with(&text, &service.config().roadmap))
                }
                DocumentKind::Inbox => to_json(&parse_inbox(&text)),
                DocumentKind::Tasks => to_json(&parse_task_file(&text)),
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| err.to_string())
}
