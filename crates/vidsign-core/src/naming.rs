//! Job identity and derived filenames.
//!
//! Every filename the service writes is derived here from a fresh job id and
//! a validated extension. Client-supplied names never reach the filesystem.

use chrono::{DateTime, Utc};

use crate::models::JobId;

/// Suffix shared by every manifest report file.
pub const MANIFEST_SUFFIX: &str = ".manifest.json";

/// The three filenames owned by a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobNames {
    pub job_id: JobId,
    /// `upload-<id>.<ext>`
    pub input: String,
    /// `video-signed-<timestamp>-<prefix>.<ext>`
    pub output: String,
    /// `video-signed-<timestamp>-<prefix>.manifest.json`
    pub manifest: String,
}

impl JobNames {
    /// Allocate a new job id and derive its filenames.
    ///
    /// `extension` must already be validated against the allow-list.
    pub fn allocate(extension: &str) -> Self {
        Self::derive(JobId::new(), extension, Utc::now())
    }

    pub fn derive(job_id: JobId, extension: &str, at: DateTime<Utc>) -> Self {
        let ext = extension.to_ascii_lowercase();
        let stem = format!(
            "video-signed-{}-{}",
            at.format("%Y%m%d_%H%M%S"),
            job_id.short()
        );

        Self {
            job_id,
            input: format!("upload-{}.{}", job_id.simple(), ext),
            output: format!("{}.{}", stem, ext),
            manifest: format!("{}{}", stem, MANIFEST_SUFFIX),
        }
    }
}
