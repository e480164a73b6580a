//! Binary entry point: resolve configuration, start logging, open the catalog
//! and drive the Ratatui event loop until the user exits.
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use book_catalog_manager::{run_app, App, Args, Catalog, Config, CsvStorage};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse())?;
    init_logging(&config)?;

    tracing::info!(path = %config.catalog_path.display(), "opening catalog");
    let catalog = Catalog::open(CsvStorage::new(&config.catalog_path))
        .with_context(|| format!("failed to load {}", config.catalog_path.display()))?;

    let mut app = App::new(catalog);
    run_app(&mut app)
}

/// Send log lines to the configured file; stdout belongs to the UI.
fn init_logging(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create log directory")?;
        }
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("failed to open log file {}", config.log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}
