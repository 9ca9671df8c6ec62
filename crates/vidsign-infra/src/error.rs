//! HTTP error response format
//!
//! The `IntoResponse` implementation for `AppError` lives in the API crate
//! because of the orphan rule.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response format for HTTP APIs
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    #[schema(example = "error")]
    pub status: &'static str,
    pub error: String,
    /// Machine-readable code, e.g. `UNSUPPORTED_FILE_TYPE`
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status: "error",
            error: error.into(),
            code: code.into(),
            error_type: None,
            details: None,
            recoverable: false,
            suggested_action: None,
        }
    }
}
