//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p vidsign-api`.
//! The signer is a stub, so no c2patool or certificates are needed.

#![allow(dead_code)]

pub mod fixtures;
pub mod signer;

use axum::Router;
use axum_test::TestServer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use vidsign_api::constants;
use vidsign_api::setup::routes;
use vidsign_api::state::AppState;
use vidsign_core::{BaseConfig, Config, SigningServiceConfig};
use vidsign_storage::StorageLayout;

pub use signer::{StubBehavior, StubSigner};

pub const PUBLIC_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server, stub signer, and owned storage roots.
pub struct TestApp {
    pub server: TestServer,
    /// The same router the server drives, for requests the server cannot express
    pub router: Router,
    pub signer: Arc<StubSigner>,
    pub _temp_dir: TempDir,
    root: PathBuf,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.root.join("signed")
    }

    pub fn manifests_dir(&self) -> PathBuf {
        self.root.join("manifests")
    }

    /// Filenames currently present in `dir`, sorted.
    pub fn files_in(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("Failed to read storage directory")
            .map(|entry| {
                entry
                    .expect("Failed to read directory entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// Assert that no job left anything behind in any storage root.
    pub fn assert_storage_empty(&self) {
        assert!(self.files_in(&self.uploads_dir()).is_empty(), "uploads not empty");
        assert!(self.files_in(&self.outputs_dir()).is_empty(), "outputs not empty");
        assert!(
            self.files_in(&self.manifests_dir()).is_empty(),
            "manifests not empty"
        );
    }
}

pub fn test_config(root: &Path, max_file_size_bytes: u64) -> Config {
    test_config_for(root, max_file_size_bytes, "test")
}

pub fn test_config_for(root: &Path, max_file_size_bytes: u64, environment: &str) -> Config {
    let cors_origins = if environment == "production" {
        vec!["https://app.example.com".to_string()]
    } else {
        vec!["*".to_string()]
    };

    Config::new(SigningServiceConfig {
        base: BaseConfig {
            app_name: "C2PA Video Signing Service".to_string(),
            app_version: "0.1.0".to_string(),
            host: "127.0.0.1".to_string(),
            server_port: 8000,
            public_base_url: PUBLIC_BASE_URL.to_string(),
            cors_origins,
            environment: environment.to_string(),
            http_concurrency_limit: 64,
            log_format: "compact".to_string(),
        },
        upload_dir: root.join("uploads"),
        output_dir: root.join("signed"),
        manifest_dir: root.join("manifests"),
        max_file_size_bytes,
        allowed_extensions: vec!["mp4".to_string(), "mov".to_string(), "m4v".to_string()],
        c2patool_path: "c2patool".to_string(),
        signing_timeout_secs: 5,
        cert_chain_path: root.join("certificate.pem"),
        private_key_path: root.join("private_key.pem"),
        signing_alg: "es256".to_string(),
    })
}

/// Setup test app with isolated storage roots and the given stub behavior.
pub async fn setup_test_app(behavior: StubBehavior) -> TestApp {
    setup_test_app_with_limit(behavior, DEFAULT_MAX_FILE_SIZE).await
}

pub async fn setup_test_app_with_limit(behavior: StubBehavior, max_file_size: u64) -> TestApp {
    build_test_app(behavior, max_file_size, "test").await
}

/// Setup test app whose config reports the given environment.
pub async fn setup_test_app_in(behavior: StubBehavior, environment: &str) -> TestApp {
    build_test_app(behavior, DEFAULT_MAX_FILE_SIZE, environment).await
}

async fn build_test_app(behavior: StubBehavior, max_file_size: u64, environment: &str) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir
        .path()
        .canonicalize()
        .expect("Failed to canonicalize temp dir");

    let config = test_config_for(&root, max_file_size, environment);
    let layout = StorageLayout::new(
        config.upload_dir(),
        config.output_dir(),
        config.manifest_dir(),
    )
    .await
    .expect("Failed to create storage layout");

    let signer = Arc::new(StubSigner::new(behavior));
    let state = Arc::new(AppState::new(config.clone(), layout, signer.clone()));

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server =
        TestServer::new(app.clone().into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        router: app,
        signer,
        _temp_dir: temp_dir,
        root,
    }
}
