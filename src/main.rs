//! # Daybell — Notion → Discord daily relay
//!
//! Announces today's entries from a Notion database on a Discord webhook and
//! ticks their checkbox so later runs stay quiet. Meant to be started by cron.
//!
//! Usage:
//!   daybell                          # Relay today's events
//!   daybell --date 2026-10-18        # Relay a specific day
//!   daybell --dry-run                # Show what would be sent
//!   daybell --config ./daybell.toml  # Use a specific config file

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use daybell_core::AppConfig;
use daybell_notion::NotionClient;
use daybell_relay::{DiscordWebhook, Relay};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "daybell",
    version,
    about = "📅 Daybell — announce today's Notion events on Discord"
)]
struct Cli {
    /// Config file (default: ~/.daybell/config.toml when it exists)
    #[arg(short, long)]
    config: Option<String>,

    /// Day to relay instead of today (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Query and print only; nothing is sent or updated
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = cli
        .config
        .as_deref()
        .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()));
    let mut config = AppConfig::load(path.as_deref())?;
    config.apply_env()?;
    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present; real environment variables take precedence.
    let dotenv = dotenvy::dotenv();

    // Logs go to stderr; stdout carries one line per page.
    let filter = if cli.verbose { "daybell=debug" } else { "daybell=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    if let Ok(path) = &dotenv {
        tracing::debug!("📄 Loaded {}", path.display());
    }

    let config = load_config(&cli)?;
    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    tracing::info!(
        "📅 Daybell v{} relaying {}{}",
        env!("CARGO_PKG_VERSION"),
        date,
        if cli.dry_run { " (dry run)" } else { "" }
    );

    let source = Arc::new(NotionClient::from_config(&config)?);
    let notifier = Arc::new(DiscordWebhook::from_config(&config)?);
    let relay = Relay::new(&config, source, notifier).dry_run(cli.dry_run);

    let mut stdout = std::io::stdout().lock();
    relay
        .run(date, &mut stdout)
        .await
        .with_context(|| format!("Relay for {date} failed"))?;

    Ok(())
}
