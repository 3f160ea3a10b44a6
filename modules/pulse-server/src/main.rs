use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pulse_common::{load_config, ReactorConfig};
use pulse_engine::{Reactor, Shutdown, SystemClock};

#[derive(Parser)]
#[command(name = "pulse", about = "Timer-driven single-threaded event reactor")]
struct Cli {
    /// Path to config TOML file. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,

    /// Stop after this many reactor cycles
    #[arg(long)]
    max_cycles: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pulse=info,pulse_engine=info,pulse_common=info"));
    if cli.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("pulse reactor starting...");

    // Load config: file first, then env overrides
    let mut config = match &cli.config {
        Some(path) => {
            info!(config = %path.display(), "Loading config");
            load_config(path)?
        }
        None => ReactorConfig::default(),
    };
    config
        .apply_env()
        .context("Failed to apply PULSE_* environment overrides")?;
    config.validate()?;
    config.log_summary();

    let shutdown = Shutdown::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C");
            on_signal.trigger();
        }
    });

    let mut reactor = Reactor::new(config, SystemClock);
    if let Some(limit) = cli.max_cycles {
        reactor = reactor.with_cycle_limit(limit);
    }

    let stats = reactor.run(&shutdown).await;
    info!("pulse reactor complete. {stats}");
    Ok(())
}
