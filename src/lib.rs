//! Restaurant assistant core: intent recognition, data handlers and an
//! LLM-backed reply pipeline, plus a line-oriented console front end.

pub mod commands;
pub mod config;
pub mod engine;
pub mod handlers;
pub mod intent;
pub mod llm;
pub mod preprocessing;
pub mod store;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::commands::{send_message, welcome_message, AppState};
use crate::config::AppConfig;
use crate::store::InMemoryStore;

#[derive(Parser, Debug)]
#[command(name = "maitre", version, about = "Ask questions about a restaurant's menu, tables and revenue")]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, env = "MAITRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON snapshot of the restaurant data.
    #[arg(long, env = "MAITRE_DATA", default_value = "data/restaurant.json")]
    pub data: PathBuf,

    /// Skip the keyword rules and classify every question with the LLM.
    #[arg(long)]
    pub no_rules: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("maitre=info,maitre_lib=info"));
    // Logs go to stderr so replies on stdout stay clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing();

    let mut overrides = HashMap::new();
    if cli.no_rules {
        overrides.insert("recognizer.rule_based".to_string(), "false".to_string());
    }
    let config = AppConfig::load(cli.config.as_deref(), &overrides).context("Failed to load configuration")?;

    let store = InMemoryStore::from_json_file(&cli.data)
        .with_context(|| format!("Failed to load restaurant data from {}", cli.data.display()))?;
    let state = AppState::new(&config, Arc::new(store))?;
    info!(rule_based = config.recognizer.rule_based, "Assistant started");

    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{}\n\n", welcome_message(&state)).as_bytes()).await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = send_message(&state, &line).await;
        stdout.write_all(format!("{}\n\n", response.text).as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("Input closed, exiting");
    Ok(())
}
