//! Multipart intake shared by the signing and verification handlers
//!
//! The video part is validated from its header before any byte is written,
//! then streamed chunk by chunk into a staged input file owned by a
//! [`CleanupGuard`].

use std::time::Instant;

use axum::extract::multipart::{Field, Multipart};
use tokio::io::AsyncWriteExt;
use vidsign_core::{AppError, JobNames, RawMetadata, StoredFileKind};
use vidsign_storage::CleanupGuard;

use crate::constants::{MAX_TEXT_FIELD_BYTES, VIDEO_FIELD};
use crate::error::HttpAppError;
use crate::state::AppState;

/// A validated video written to the uploads root.
///
/// Dropping it removes the staged file.
#[derive(Debug)]
pub struct StagedUpload {
    pub names: JobNames,
    /// Sanitized client filename, for echo only
    pub original_filename: String,
    pub size: u64,
    pub staged: CleanupGuard,
}

/// Read the whole form: exactly one `video` part plus the text metadata
/// fields. Unknown fields are skipped.
pub async fn receive_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(StagedUpload, RawMetadata), HttpAppError> {
    let mut video: Option<StagedUpload> = None;
    let mut metadata = RawMetadata::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string).unwrap_or_default();

        match field_name.as_str() {
            VIDEO_FIELD => {
                if video.is_some() {
                    return Err(AppError::InvalidInput(format!(
                        "Multiple '{}' fields are not allowed",
                        VIDEO_FIELD
                    ))
                    .into());
                }
                video = Some(stage_video(state, field).await?);
            }
            "organization" => {
                metadata.organization = Some(read_text_field(field, "organization").await?);
            }
            "ai_tool" => {
                metadata.ai_tool = Some(read_text_field(field, "ai_tool").await?);
            }
            "title" => {
                metadata.title = Some(read_text_field(field, "title").await?);
            }
            "description" => {
                metadata.description = Some(read_text_field(field, "description").await?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    let video = video.ok_or_else(|| {
        AppError::InvalidInput(format!("No '{}' file provided", VIDEO_FIELD))
    })?;

    Ok((video, metadata))
}

/// Read a text field without buffering more than [`MAX_TEXT_FIELD_BYTES`].
async fn read_text_field(mut field: Field<'_>, name: &str) -> Result<String, HttpAppError> {
    let mut buf: Vec<u8> = Vec::new();

    while let Some(chunk) = field.chunk().await? {
        if buf.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(AppError::InvalidMetadata(format!(
                "Field '{}' exceeds {} bytes",
                name, MAX_TEXT_FIELD_BYTES
            ))
            .into());
        }
        buf.extend_from_slice(&chunk);
    }

    String::from_utf8(buf).map_err(|_| {
        HttpAppError::from(AppError::InvalidMetadata(format!(
            "Field '{}' is not valid UTF-8",
            name
        )))
    })
}

async fn stage_video(state: &AppState, mut field: Field<'_>) -> Result<StagedUpload, HttpAppError> {
    let validator = &state.validator;
    let client_filename = field.file_name().map(str::to_string);

    // Rejections here happen before the uploads root is touched
    let extension = validator.validate_filename(client_filename.as_deref())?;
    let original_filename = validator.echo_filename(client_filename.as_deref().unwrap_or_default());

    let names = JobNames::allocate(&extension);
    let input = state.layout.resolve(StoredFileKind::Input, &names.input)?;
    let mut file = input.create().await?;
    let staged = CleanupGuard::new(input);

    let start = Instant::now();
    let mut received: u64 = 0;

    while let Some(chunk) = field.chunk().await? {
        received += chunk.len() as u64;
        validator.check_size_limit(received)?;
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("Failed to write upload: {}", e)))?;
    }

    file.flush()
        .await
        .map_err(|e| AppError::StorageUnavailable(format!("Failed to flush upload: {}", e)))?;
    file.sync_all()
        .await
        .map_err(|e| AppError::StorageUnavailable(format!("Failed to sync upload: {}", e)))?;

    validator.validate_file_size(received)?;

    tracing::debug!(
        job_id = %names.job_id,
        file_size = received,
        duration_ms = start.elapsed().as_millis() as u64,
        "Upload staged"
    );

    Ok(StagedUpload {
        names,
        original_filename,
        size: received,
        staged,
    })
}
