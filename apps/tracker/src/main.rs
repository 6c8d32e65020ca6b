use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{build_issue_source, FilterState, IssueTracker, SortOrder, StatusFilter};
use shared::domain::IssueId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod navigation;
mod render;

use config::{process_env, read_settings_file, resolve_settings, Settings, DEFAULT_CONFIG_FILE};
use controller::{parse_command, Command, HELP};
use navigation::TerminalNavigator;
use render::render_tracker;

#[derive(Parser, Debug)]
#[command(name = "track-issues", about = "Browse and filter student issues")]
struct Args {
    /// Base URL of the issues API (the collection lives at `<url>/issues/`).
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "all")]
    status: StatusFilter,
    #[arg(long, default_value = "newest")]
    sort: SortOrder,
    /// Print the list once and exit.
    #[arg(long)]
    once: bool,
    /// Open an issue's detail page after loading and exit.
    #[arg(long, value_name = "ID")]
    open: Option<i64>,
}

impl Args {
    fn initial_filters(&self) -> FilterState {
        FilterState {
            search_term: self.search.clone(),
            status_filter: self.status.clone(),
            sort_by: self.sort,
        }
    }

    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(server_url) = &self.server_url {
            settings.server_url = server_url.clone();
        }
    }
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let (file_settings, file_error) = match read_settings_file(&config_path) {
        Ok(file_settings) => (file_settings, None),
        Err(err) => (None, Some(err)),
    };
    let mut settings = resolve_settings(file_settings, process_env);
    args.apply_overrides(&mut settings);

    init_logging(&settings.log_filter);
    if let Some(err) = file_error {
        warn!(path = %config_path.display(), error = %format!("{err:#}"), "ignoring config file");
    }

    let source = build_issue_source(&settings.server_url, settings.request_timeout());

    let mut out = io::stdout();
    let mut navigator = TerminalNavigator::new(settings.detail_base_url.clone(), io::stdout());
    let interactive = !args.once && args.open.is_none();

    let mut tracker = IssueTracker::with_filters(args.initial_filters());
    if interactive {
        render_tracker(&tracker, &mut out)?;
        writeln!(out)?;
    }
    tracker.load(&*source).await;

    if let Some(id) = args.open {
        return tracker
            .open_issue(IssueId(id), &mut navigator)
            .context("cannot open issue");
    }

    render_tracker(&tracker, &mut out)?;
    if args.once {
        return Ok(());
    }

    writeln!(out, "\nType 'help' for commands.")?;
    prompt(&mut out)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read command")?
    {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(out, "{HELP}")?,
            Ok(Some(Command::Redraw)) => render_tracker(&tracker, &mut out)?,
            Ok(Some(Command::Intent(intent))) => {
                tracker.apply(intent);
                render_tracker(&tracker, &mut out)?;
            }
            Ok(Some(Command::Open(issue_id))) => {
                if let Err(err) = tracker.open_issue(issue_id, &mut navigator) {
                    writeln!(out, "{err}")?;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        prompt(&mut out)?;
    }

    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
