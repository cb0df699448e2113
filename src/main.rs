use anyhow::{Context, Result};
use lineup_dash::config::Config;
use lineup_dash::ingest;
use lineup_dash::pipeline::{self, AnalysisFilter};
use lineup_dash::session::Session;
use lineup_dash::stats::aggregate::classify_all;
use lineup_dash::stats::ClassifiedEvent;
use lineup_dash::tui::{self, TuiCommand};
use std::path::Path;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = std::fs::File::create("lineup-dash.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lineup_dash=info")),
        )
        .with_ansi(false)
        .with_writer(log_file)
        .init();

    let json_mode = std::env::args().any(|arg| arg == "--json");

    let config_path = Path::new(CONFIG_FILE);
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        tracing::info!("no {} found, using defaults", CONFIG_FILE);
        Config::default()
    };

    // Load saved settings from .env (real env vars take precedence)
    Config::load_env_file();

    if !json_mode {
        println!();
        println!("  Lineup Dashboard v0.1.0");
        println!("  =======================");
        println!();
    }

    Config::check_password()?;

    let games = ingest::load_season(&config.data.folder, &config.data.columns)
        .with_context(|| format!("Failed to load games from {}", config.data.folder.display()))?;
    tracing::info!(games = games.len(), folder = %config.data.folder.display(), "season loaded");

    if json_mode {
        let events: Vec<ClassifiedEvent> =
            games.iter().flat_map(|g| classify_all(&g.events)).collect();
        let report = pipeline::run(&events, &AnalysisFilter::default());
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut session = Session::new(games, &config);
    let (state_tx, state_rx) = watch::channel(session.snapshot());
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<TuiCommand>(16);

    // Every command is applied in order and republishes a full snapshot.
    let engine = tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            if !session.apply(cmd) {
                break;
            }
            if state_tx.send(session.snapshot()).is_err() {
                break;
            }
        }
        tracing::debug!("session closed");
    });

    let result = tui::run_tui(state_rx, cmd_tx).await;
    if let Err(e) = engine.await {
        tracing::error!("session task failed: {:#}", e);
    }
    result
}
