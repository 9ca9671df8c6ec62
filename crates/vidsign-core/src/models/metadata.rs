use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sanitized provenance metadata attached to a signed video.
///
/// Only ever constructed through
/// [`UploadValidator::sanitize_metadata`](crate::validation::UploadValidator::sanitize_metadata),
/// so every field is free of control characters, path delimiters and markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SigningMetadata {
    /// Organization credited as creator
    #[schema(example = "Acme")]
    pub organization: String,
    /// Generative tool recorded as the software agent
    #[schema(example = "Veo 3")]
    pub ai_tool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
