use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use vidsign_core::{AppError, StoredFileKind};
use vidsign_infra::ErrorResponse;
use vidsign_storage::StoredFile;

use crate::error::HttpAppError;
use crate::state::AppState;

fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "m4v" => "video/x-m4v",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Download a signed video or its manifest report
///
/// Only names produced by a signing request resolve. Anything else,
/// including names that try to leave the storage directories, is 404.
#[utoipa::path(
    get,
    path = "/api/v1/files/{filename}",
    tag = "files",
    params(
        ("filename" = String, Path, description = "Filename from a download_url or manifest_url")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let file = state
        .layout
        .locate(&StoredFileKind::SERVABLE, &filename)
        .await?;

    file_response(&file).await
}

async fn file_response(file: &StoredFile) -> Result<Response, HttpAppError> {
    let len = file.len().await?;
    let stream = file.stream().await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(file.filename()))
        .header(header::CONTENT_LENGTH, len)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename()),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(format!("Failed to build file response: {}", e)))?;

    Ok(response)
}
