//! Route configuration and setup.
//!
//! Health and service info handlers live in [health](health).

pub mod health;

use crate::api_doc::ApiDoc;
use crate::constants::{API_PREFIX, DOCS_PATH, MULTIPART_OVERHEAD_BYTES, OPENAPI_PATH};
use crate::error::{error_details_middleware, ErrorDetailsPolicy};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use vidsign_core::Config;
use vidsign_infra::{
    request_id_middleware, security_headers_middleware, SecurityHeadersConfig,
};

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = config.http_concurrency_limit().max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    // Multipart framing and text fields ride on top of the video itself
    let body_limit = config
        .max_file_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let app = api_routes()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .merge(RapiDoc::with_openapi(OPENAPI_PATH, ApiDoc::openapi()).path(DOCS_PATH))
        .layer(axum::middleware::from_fn_with_state(
            ErrorDetailsPolicy::from_config(config),
            error_details_middleware,
        ))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            Arc::new(SecurityHeadersConfig::new(config.is_production())),
            security_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/sign-video", API_PREFIX),
            post(handlers::sign_video::sign_video),
        )
        .route(
            &format!("{}/verify-video", API_PREFIX),
            post(handlers::verify_video::verify_video),
        )
        .route(
            &format!("{}/files/{{filename}}", API_PREFIX),
            get(handlers::files::download_file),
        )
        .route(
            &format!("{}/health", API_PREFIX),
            get(health::health_check),
        )
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
