//! Anime search CLI application.

use anime_search::{JikanClient, SearchController, SearchReport, TerminalView, TriggerEvent};
use anyhow::{Context, Result};
use clap::Parser;
use shared::{Config, LogConfig};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const QUIT_COMMAND: &str = ":quit";

#[derive(Parser, Debug)]
#[command(author, version, about = "Search the anime catalog from the terminal", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run a single search and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let mut log_config = LogConfig::from_settings("anime-search", &config.logging);
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    if args.write_config {
        config
            .save(&args.config)
            .with_context(|| format!("Failed to write config to {}", args.config.display()))?;
        return Ok(());
    }

    info!(config_file = %args.config.display(), base_url = %config.search.base_url, "Anime search starting");

    let client = JikanClient::new(
        &config.search.base_url,
        &config.search.user_agent,
        config.search.request_timeout_secs.map(Duration::from_secs),
    )
    .context("Failed to create Jikan client")?;

    let stdout = std::io::stdout();
    let interactive = args.query.is_none();
    let view = TerminalView::new(
        stdout,
        config.search.card_width,
        interactive && std::io::stdout().is_terminal(),
    );
    let controller = SearchController::new(Arc::new(client), view);

    match args.query {
        Some(query) => {
            if controller.handle(TriggerEvent::Click, &query).await == SearchReport::Ignored {
                warn!("Empty query, nothing to search");
            }
        }
        None => run_interactive(&controller).await?,
    }

    Ok(())
}

/// Read queries line by line; every line is an Enter press on the input field.
///
/// Searches run concurrently with input. Pending searches are awaited on exit.
async fn run_interactive(controller: &SearchController<TerminalView<std::io::Stdout>>) -> Result<()> {
    eprintln!("Type a title and press Enter ({} to exit)", QUIT_COMMAND);
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = Vec::new();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if line.trim() == QUIT_COMMAND {
            break;
        }

        pending.retain(|handle: &tokio::task::JoinHandle<SearchReport>| !handle.is_finished());
        if let Some(handle) = controller.spawn(TriggerEvent::KeyUp("Enter"), &line) {
            pending.push(handle);
        }
        prompt();
    }

    for handle in pending {
        if let Err(e) = handle.await {
            warn!(error = %e, "Search task failed");
        }
    }

    info!(searches = controller.latest_issued(), "Anime search finished");
    Ok(())
}

fn prompt() {
    eprint!("> ");
}
