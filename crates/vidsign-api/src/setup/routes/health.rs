//! Health check and service info handlers

use crate::constants::{API_PREFIX, DOCS_PATH, OPENAPI_PATH};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: &'static str,
    pub service: String,
    pub version: String,
}

/// Liveness check. No side effects.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.config.app_name().to_string(),
        version: state.config.app_version().to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: &'static str,
    pub docs: &'static str,
    pub openapi: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub sign_video: String,
    pub verify_video: String,
    pub files: String,
    pub health: String,
}

pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: state.config.app_name().to_string(),
        version: state.config.app_version().to_string(),
        status: "running",
        docs: DOCS_PATH,
        openapi: OPENAPI_PATH,
        endpoints: Endpoints {
            sign_video: format!("POST {}/sign-video", API_PREFIX),
            verify_video: format!("POST {}/verify-video", API_PREFIX),
            files: format!("GET {}/files/{{filename}}", API_PREFIX),
            health: format!("GET {}/health", API_PREFIX),
        },
    })
}
