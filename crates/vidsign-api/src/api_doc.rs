//! OpenAPI documentation

use utoipa::OpenApi;
use vidsign_core::SigningMetadata;
use vidsign_infra::ErrorResponse;
use vidsign_signer::VerificationReport;

use crate::handlers;
use crate::services::{SignVideoResponse, SignedLinks, SignedVideoMetadata};
use crate::setup::routes::health;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidsign API",
        description = "Embeds C2PA content credentials into AI-generated videos and serves the signed results. All endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::sign_video::sign_video,
        handlers::verify_video::verify_video,
        handlers::files::download_file,
        health::health_check,
    ),
    components(schemas(
        SignVideoResponse,
        SignedLinks,
        SignedVideoMetadata,
        SigningMetadata,
        VerificationReport,
        ErrorResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "signing", description = "Content credential signing and verification"),
        (name = "files", description = "Signed video and manifest downloads"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
