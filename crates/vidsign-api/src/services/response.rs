//! Success payload for `POST /sign-video`

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use vidsign_core::Config;

use crate::constants::API_PREFIX;
use crate::services::signing::SignedJob;

#[derive(Debug, Serialize, ToSchema)]
pub struct SignVideoResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    pub message: String,
    pub job_id: Uuid,
    pub links: SignedLinks,
    pub metadata: SignedVideoMetadata,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignedLinks {
    pub download_url: String,
    pub manifest_url: String,
    /// Credentials are embedded in the video itself
    #[schema(example = "embedded")]
    pub mode: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignedVideoMetadata {
    pub original_filename: String,
    pub file_size_bytes: u64,
    pub file_size_mb: f64,
    pub signed_at: DateTime<Utc>,
    pub organization: String,
    pub ai_tool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Public URL of a served file. `filename` is always a derived name.
pub fn file_url(config: &Config, filename: &str) -> String {
    format!("{}{}/files/{}", config.public_base_url(), API_PREFIX, filename)
}

impl SignVideoResponse {
    pub fn assemble(config: &Config, signed: &SignedJob) -> Self {
        let job = &signed.job;

        Self {
            status: "ok",
            message: "Video signed with content credentials".to_string(),
            job_id: *job.id.as_uuid(),
            links: SignedLinks {
                download_url: file_url(config, signed.artifacts.output.filename()),
                manifest_url: file_url(config, signed.artifacts.manifest.filename()),
                mode: "embedded",
            },
            metadata: SignedVideoMetadata {
                original_filename: job.original_filename.clone(),
                file_size_bytes: job.file_size_bytes,
                file_size_mb: job.file_size_mb(),
                signed_at: signed.signed_at,
                organization: job.metadata.organization.clone(),
                ai_tool: job.metadata.ai_tool.clone(),
                title: job.metadata.title.clone(),
                description: job.metadata.description.clone(),
            },
        }
    }
}
