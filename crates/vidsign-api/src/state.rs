use std::sync::Arc;

use vidsign_core::{Config, UploadValidator};
use vidsign_signer::ProvenanceSigner;
use vidsign_storage::StorageLayout;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub layout: StorageLayout,
    pub validator: UploadValidator,
    pub signer: Arc<dyn ProvenanceSigner>,
}

impl AppState {
    pub fn new(config: Config, layout: StorageLayout, signer: Arc<dyn ProvenanceSigner>) -> Self {
        let validator = UploadValidator::from_config(&config);
        Self {
            config: Arc::new(config),
            layout,
            validator,
            signer,
        }
    }
}
