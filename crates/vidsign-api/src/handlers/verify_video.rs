use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use vidsign_infra::ErrorResponse;
use vidsign_signer::VerificationReport;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::receive_upload;

/// Read the content credentials embedded in an uploaded video
///
/// A video without credentials yields `valid: false`, not an error. The
/// uploaded copy is removed once the report is read.
#[utoipa::path(
    post,
    path = "/api/v1/verify-video",
    tag = "signing",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Verification report", body = VerificationReport),
        (status = 400, description = "Unsupported file type or unsafe filename", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 503, description = "Signing tool unavailable", body = ErrorResponse),
        (status = 504, description = "Verification timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn verify_video(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let (upload, _) = receive_upload(&state, multipart).await?;

    let report = state.signer.verify(upload.staged.file().path()).await?;

    tracing::info!(
        job_id = %upload.names.job_id,
        valid = report.valid,
        "Verification finished"
    );

    Ok(Json(report).into_response())
}
