//! Engine binary for the department coverage map.
//!
//! Loads configuration and the four datasets, runs a first pipeline
//! cycle to validate them, and serves the Observer API until the
//! process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `RAILMAP_CONFIG` or `railmap-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load the boundary, population, rail and line datasets
//! 4. Build the coverage session and run a first cycle
//! 5. Start the Observer API server

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use railmap_core::{CoverageSession, RailmapConfig, format_percentage, format_population};
use railmap_core::config::{DataConfig, LoggingConfig};
use railmap_observer::{AppState, ServerConfig};
use railmap_types::CoverageCategory;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "railmap-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any startup step fails or the server stops with
/// an error.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("railmap-engine starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }

    // 3-4. Load datasets, build the session and run a first cycle.
    let session = load_session(&config.data)?;
    let output = session.run_cycle()?;
    info!(
        regions = output.dataset.len(),
        total = %format_population(output.summary.total),
        with_line = %format_percentage(output.summary.with_line.percentage),
        with_service = %format_percentage(output.summary.with_service.percentage),
        "Initial coverage computed"
    );
    for category in CoverageCategory::ALL {
        let share = output.summary.share(category);
        info!(
            category = category.label(),
            population = %format_population(share.population),
            percentage = %format_percentage(share.percentage),
            "Coverage share"
        );
    }

    // 5. Serve.
    let server = ServerConfig::from(&config.server);
    let state = Arc::new(AppState::new(session));
    railmap_observer::start_server(&server, state).await?;

    info!("railmap-engine stopped");
    Ok(())
}

/// Load configuration from `RAILMAP_CONFIG`, falling back to
/// `railmap-config.yaml` and then to defaults.
///
/// Returns the path that was read, if any.
fn load_config() -> Result<(RailmapConfig, Option<PathBuf>), EngineError> {
    let path = std::env::var_os("RAILMAP_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = RailmapConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = RailmapConfig::default();
        config.apply_env_overrides();
        Ok((config, None))
    }
}

/// Read every dataset named by `data` into a fresh session.
///
/// `load_datasets` logs the dataset counts.
fn load_session(data: &DataConfig) -> Result<CoverageSession, EngineError> {
    let sources = data.sources()?;
    let datasets = railmap_loader::load_datasets(&sources)?;
    Ok(CoverageSession::new(datasets)?)
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
