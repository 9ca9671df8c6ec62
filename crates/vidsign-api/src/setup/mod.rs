//! Application setup and initialization
//!
//! All startup wiring lives here so `main.rs` stays a few lines and tests can
//! build the same router around their own state.

pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::str::FromStr;
use std::sync::Arc;
use vidsign_core::Config;
use vidsign_infra::LogFormat;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Telemetry first so configuration warnings are recorded
    let log_format = LogFormat::from_str(config.log_format())
        .map_err(|e| anyhow::anyhow!("Invalid LOG_FORMAT: {}", e))?;
    vidsign_infra::init_telemetry(log_format, config.app_name(), config.app_version())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    // Storage roots and signer credentials
    let state = services::initialize_services(&config).await?;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
