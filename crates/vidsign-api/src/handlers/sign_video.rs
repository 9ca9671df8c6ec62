use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use vidsign_infra::ErrorResponse;

use crate::error::HttpAppError;
use crate::services::{sign_upload, SignVideoResponse};
use crate::state::AppState;
use crate::utils::upload::receive_upload;

/// Sign an uploaded video with content credentials
///
/// Multipart fields: `video` (file, mp4/mov/m4v), `organization`, `ai_tool`,
/// and optional `title` and `description`.
#[utoipa::path(
    post,
    path = "/api/v1/sign-video",
    tag = "signing",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video signed", body = SignVideoResponse),
        (status = 400, description = "Unsupported file type, invalid metadata or unsafe filename", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Signing failed", body = ErrorResponse),
        (status = 503, description = "Signing tool unavailable", body = ErrorResponse),
        (status = 504, description = "Signing timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn sign_video(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let (upload, raw_metadata) = receive_upload(&state, multipart).await?;
    let metadata = state.validator.sanitize_metadata(&raw_metadata)?;

    let signed = sign_upload(&state, upload, metadata).await?;

    Ok(Json(SignVideoResponse::assemble(&state.config, &signed)).into_response())
}
