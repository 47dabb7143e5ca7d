//! Marquee - a tile-grid launcher for installed games
//!
//! Reads a CSV catalog of programs, shows one tile per entry, launches the
//! program on activation, and minimizes itself until the program exits.

mod app;
mod grid;
mod icons;
mod tile;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Marquee - tile-grid game launcher
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(about = "GTK4 tile-grid launcher", long_about = None)]
struct Args {
    /// Catalog file path (or set MARQUEE_CATALOG env var)
    #[arg(short = 'c', long, env = "MARQUEE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn config_base() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    tracing::info!("Starting marquee");

    let config_path = args
        .config
        .unwrap_or_else(|| config_base().join("config.toml"));
    let config = marquee_config::load_config(&config_path)
        .with_context(|| format!("Invalid config file {}", config_path.display()))?;

    // CLI flag beats config file beats the platform default
    let catalog_path = args
        .catalog
        .or_else(|| config.catalog.clone())
        .unwrap_or_else(|| config_base().join("games.csv"));

    let application = app::LauncherApp::new(config, catalog_path);
    let exit_code = application.run();

    std::process::exit(exit_code);
}
