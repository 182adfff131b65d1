//! GOG Dashboard - Desktop front end for a self-hosted GOG download manager
//!
//! Lists the local lgogdownloader catalog, starts and stops downloads on the
//! server and polls their progress together with the GOG session status.

mod api;
mod app;
mod config;
mod dashboard;
mod shared;
mod storage;
mod worker;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::GogDashboard;
use crate::config::AppConfig;

/// GOG Dashboard - manage downloads of your GOG library
#[derive(Parser, Debug)]
#[command(name = "gog-dashboard")]
#[command(about = "Desktop dashboard for a self-hosted GOG library download manager")]
struct Args {
    /// Download manager base URL (overrides config)
    #[arg(short, long)]
    server: Option<String>,

    /// Poll interval in seconds (overrides config)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("GOG Dashboard starting...");

    let config_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => storage::default_config_path()
            .map_err(|e| warn!("{}", e))
            .ok(),
    };

    let mut config = load_or_create_config(config_path.as_deref());
    apply_overrides(&mut config, &args);

    if args.write_config {
        let path = config_path.ok_or_else(|| anyhow::anyhow!("No config path available"))?;
        config::save_config(&config, &path)?;
        info!("Wrote configuration to {:?}", path);
        return Ok(());
    }

    info!(
        "Server {} polled every {}s",
        config.server.base_url,
        config.polling.interval().as_secs()
    );

    GogDashboard::new(config)?.run()?;

    info!("GOG Dashboard shutdown complete");

    Ok(())
}

/// Load configuration from file or create default
fn load_or_create_config(path: Option<&std::path::Path>) -> AppConfig {
    if let Some(config_path) = path {
        if config_path.exists() {
            match config::load_config(config_path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", config_path);
                    return config;
                }
                Err(e) => warn!("{:#}", e),
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

/// Command line values win over the config file
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(server) = &args.server {
        config.server.base_url = server.clone();
    }
    if let Some(interval) = args.interval {
        config.polling.interval_secs = interval;
    }
}
