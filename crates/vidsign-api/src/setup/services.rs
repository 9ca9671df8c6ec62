//! Storage and signer initialization

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use vidsign_core::Config;
use vidsign_signer::C2paSigner;
use vidsign_storage::StorageLayout;

/// Create the storage roots and load the signer. Any failure aborts startup.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let layout = StorageLayout::new(
        config.upload_dir(),
        config.output_dir(),
        config.manifest_dir(),
    )
    .await
    .context("Failed to prepare storage directories")?;

    tracing::info!(
        uploads = %config.upload_dir().display(),
        outputs = %config.output_dir().display(),
        manifests = %config.manifest_dir().display(),
        "Storage directories ready"
    );

    let signer = C2paSigner::initialize(config)
        .await
        .context("Failed to initialize signer")?;

    Ok(Arc::new(AppState::new(
        config.clone(),
        layout,
        Arc::new(signer),
    )))
}
