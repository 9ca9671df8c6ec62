use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

use super::metadata::SigningMetadata;

/// Length of the id prefix embedded in output filenames (60 random bits).
pub const JOB_ID_PREFIX_LEN: usize = 16;

/// Identity of one signing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub fn new() -> Self {
        JobId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// 32 lowercase hex characters without hyphens.
    pub fn simple(&self) -> String {
        self.0.simple().to_string()
    }

    /// Filename prefix: the first 16 hex characters of the id.
    pub fn short(&self) -> String {
        let mut simple = self.simple();
        simple.truncate(JOB_ID_PREFIX_LEN);
        simple
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for JobId {
    fn from(id: Uuid) -> Self {
        JobId(id)
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOutcome {
    Pending,
    Succeeded,
    Failed,
}

impl Display for JobOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            JobOutcome::Pending => write!(f, "pending"),
            JobOutcome::Succeeded => write!(f, "succeeded"),
            JobOutcome::Failed => write!(f, "failed"),
        }
    }
}

/// One signing request, from validated upload until the signer returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Client-supplied name, sanitized for echo only. Never used as a path.
    pub original_filename: String,
    pub file_size_bytes: u64,
    pub created_at: DateTime<Utc>,
    pub metadata: SigningMetadata,
    pub outcome: JobOutcome,
}

impl Job {
    pub fn new(
        id: JobId,
        original_filename: String,
        file_size_bytes: u64,
        metadata: SigningMetadata,
    ) -> Self {
        Self {
            id,
            original_filename,
            file_size_bytes,
            created_at: Utc::now(),
            metadata,
            outcome: JobOutcome::Pending,
        }
    }

    pub fn mark_succeeded(&mut self) {
        self.outcome = JobOutcome::Succeeded;
    }

    pub fn mark_failed(&mut self) {
        self.outcome = JobOutcome::Failed;
    }

    /// Size in megabytes, rounded to two decimals.
    pub fn file_size_mb(&self) -> f64 {
        let mb = self.file_size_bytes as f64 / (1024.0 * 1024.0);
        (mb * 100.0).round() / 100.0
    }
}
