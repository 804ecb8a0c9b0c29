//! Homework bot — relays homework review status changes to Telegram.
//!
//! Fatal only at startup: missing configuration or a bot that cannot be
//! built. Every later failure is handled inside the poller.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use common::config::Config;
use poller::api::PracticumClient;
use poller::poller::Poller;
use std::sync::Arc;
use telegram::TelegramNotifier;
use tracing::{debug, error, info};
use tracing_subscriber::fmt::time::ChronoLocal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run a single poll and exit.
    #[arg(long)]
    once: bool,
    /// Initial `from_date` cursor in Unix seconds. Defaults to now.
    #[arg(long)]
    from_date: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homework_bot=debug,poller=debug,telegram=debug".into()),
        )
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .init();

    let args = Args::parse();

    let config = Config::from_env()
        .inspect_err(|e| error!("{}. Program stopped.", e))
        .context("Failed to load configuration")?;
    debug!(config = ?config.redacted(), "Configuration loaded");

    let notifier = TelegramNotifier::new(&config)
        .inspect_err(|e| error!("Could not start Telegram bot: {}. Program stopped.", e))
        .context("Failed to build Telegram bot")?;

    let api = PracticumClient::new(&config);
    let cursor = args.from_date.unwrap_or_else(|| Utc::now().timestamp());
    let mut poller = Poller::new(Arc::new(api), Arc::new(notifier), cursor);

    if args.once {
        let outcome = poller.tick().await;
        info!(?outcome, cursor = poller.cursor(), "Single poll finished");
        return Ok(());
    }

    tokio::select! {
        _ = poller.run(config.retry_period) => {}
        res = tokio::signal::ctrl_c() => {
            res.context("Failed to listen for Ctrl-C")?;
            info!("Received Ctrl-C, shutting down");
        }
    }

    Ok(())
}
