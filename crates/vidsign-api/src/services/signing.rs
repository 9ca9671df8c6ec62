//! Signing pipeline for one staged upload

use std::time::Instant;

use chrono::{DateTime, Utc};
use vidsign_core::{AppError, Job, SigningMetadata, StoredFileKind};
use vidsign_signer::{SignedArtifacts, SigningRequest};
use vidsign_storage::CleanupGuard;

use crate::state::AppState;
use crate::utils::upload::StagedUpload;

/// A job whose signer run succeeded.
#[derive(Debug)]
pub struct SignedJob {
    pub job: Job,
    pub artifacts: SignedArtifacts,
    pub signed_at: DateTime<Utc>,
}

/// Run the signer over a staged upload.
///
/// The run happens on a detached task that owns the staged input and both
/// artifact guards, so it completes even if the client disconnects. Output
/// and manifest survive only when the signer reports success; the staged
/// input never survives.
#[tracing::instrument(skip_all, fields(job_id = %upload.names.job_id))]
pub async fn sign_upload(
    state: &AppState,
    upload: StagedUpload,
    metadata: SigningMetadata,
) -> Result<SignedJob, AppError> {
    let StagedUpload {
        names,
        original_filename,
        size,
        staged,
    } = upload;

    let mut job = Job::new(names.job_id, original_filename, size, metadata.clone());
    let output = state.layout.resolve(StoredFileKind::Output, &names.output)?;
    let manifest = state.layout.resolve(StoredFileKind::Manifest, &names.manifest)?;
    let signed_at = Utc::now();

    let request = SigningRequest {
        input: staged.file().clone(),
        output: output.clone(),
        manifest: manifest.clone(),
        metadata,
        signed_at,
    };

    tracing::info!(
        file_size = job.file_size_bytes,
        organization = %job.metadata.organization,
        ai_tool = %job.metadata.ai_tool,
        "Signing job started"
    );

    let signer = state.signer.clone();
    let start = Instant::now();
    let task = tokio::spawn(async move {
        let _staged = staged;
        let output = CleanupGuard::new(output);
        let manifest = CleanupGuard::new(manifest);

        let result = signer.sign(request).await;
        if result.is_ok() {
            output.keep();
            manifest.keep();
        }
        result
    });

    let result = task
        .await
        .map_err(|e| AppError::Internal(format!("Signing task aborted: {}", e)))?;
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(artifacts) => {
            job.mark_succeeded();
            tracing::info!(
                outcome = %job.outcome,
                output = %artifacts.output.filename(),
                manifest = %artifacts.manifest.filename(),
                duration_ms,
                "Signing job finished"
            );
            Ok(SignedJob {
                job,
                artifacts,
                signed_at,
            })
        }
        Err(e) => {
            job.mark_failed();
            tracing::warn!(
                outcome = %job.outcome,
                error = %e,
                duration_ms,
                "Signing job failed"
            );
            Err(e.into())
        }
    }
}
