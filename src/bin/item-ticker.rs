// Copyright (c) 2025 - Cowboy AI, Inc.
//! Item Ticker
//!
//! Mounts an item detail view over a ticking item service and logs every
//! render until the run time elapses or Ctrl-C is pressed.
//!
//! Run with: cargo run --bin item-ticker
//!
//! Environment:
//! - TICKER_INTERVAL_MS: milliseconds between items (default 2000)
//! - TICKER_RUN_FOR_MS: stop after this many milliseconds (default: run until Ctrl-C)
//! - RUST_LOG: tracing filter

use anyhow::{Context, Result};
use cim_latest_binding::config::duration_millis;
use cim_latest_binding::{ItemDetail, ItemService, TickerConfig};
use std::time::Duration;
use tracing::info;

/// Configuration for the demo binary
#[derive(Debug, Clone)]
struct DemoConfig {
    /// Ticker settings
    ticker: TickerConfig,
    /// Optional run time limit
    run_for: Option<Duration>,
}

impl DemoConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let mut ticker = TickerConfig::default();
        if let Ok(value) = std::env::var("TICKER_INTERVAL_MS") {
            ticker.interval_ms = value
                .parse()
                .with_context(|| format!("TICKER_INTERVAL_MS is not a number: {value}"))?;
        }
        ticker.validate().context("Invalid ticker configuration")?;

        let run_for = match std::env::var("TICKER_RUN_FOR_MS") {
            Ok(value) => Some(Duration::from_millis(
                value
                    .parse()
                    .with_context(|| format!("TICKER_RUN_FOR_MS is not a number: {value}"))?,
            )),
            Err(_) => None,
        };

        Ok(Self { ticker, run_for })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = DemoConfig::from_env()?;
    info!(
        interval_ms = config.ticker.interval_ms,
        run_for_ms = config.run_for.map(duration_millis),
        "Starting item ticker"
    );

    let service = ItemService::new(&config.ticker).context("Failed to create item service")?;
    let mut view = ItemDetail::mount(&service);

    let deadline = async {
        match config.run_for {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            changed = view.changed() => {
                if !changed {
                    break;
                }
                match view.render() {
                    Some(detail) => info!(%detail, "Render"),
                    None => info!("Render: nothing to show"),
                }
            }
            _ = &mut deadline => {
                info!("Run time elapsed");
                break;
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Interrupted");
                break;
            }
        }
    }

    view.unmount();
    info!("Item ticker stopped");
    Ok(())
}
