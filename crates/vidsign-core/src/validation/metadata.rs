//! Metadata string sanitization

use super::ValidationError;
use crate::models::SigningMetadata;

pub const MAX_ORGANIZATION_LENGTH: usize = 200;
pub const MAX_AI_TOOL_LENGTH: usize = 200;
pub const MAX_TITLE_LENGTH: usize = 300;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Metadata fields exactly as received from the client.
#[derive(Debug, Clone, Default)]
pub struct RawMetadata {
    pub organization: Option<String>,
    pub ai_tool: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

const MARKUP_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// Strip control characters, path delimiters, `..` and markup characters,
/// trim, then truncate to `max_chars` characters.
pub fn sanitize_text(value: &str, max_chars: usize) -> String {
    let mut cleaned: String = value
        .chars()
        .filter(|c| !c.is_control() && *c != '/' && *c != '\\' && !MARKUP_CHARS.contains(c))
        .collect();

    // Removing one ".." can join two dots into a new one.
    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", "");
    }

    let truncated: String = cleaned.trim().chars().take(max_chars).collect();
    truncated.trim().to_string()
}

fn required(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    let cleaned = sanitize_text(value, max_chars);
    if cleaned.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(cleaned)
}

fn optional(value: Option<&str>, max_chars: usize) -> Option<String> {
    value
        .map(|v| sanitize_text(v, max_chars))
        .filter(|v| !v.is_empty())
}

impl RawMetadata {
    /// Produce the cleaned metadata bundle, or reject it.
    pub fn sanitize(&self) -> Result<SigningMetadata, ValidationError> {
        Ok(SigningMetadata {
            organization: required(
                "organization",
                self.organization.as_deref(),
                MAX_ORGANIZATION_LENGTH,
            )?,
            ai_tool: required("ai_tool", self.ai_tool.as_deref(), MAX_AI_TOOL_LENGTH)?,
            title: optional(self.title.as_deref(), MAX_TITLE_LENGTH),
            description: optional(self.description.as_deref(), MAX_DESCRIPTION_LENGTH),
        })
    }
}
