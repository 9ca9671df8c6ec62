//! Error types module
//!
//! This module provides the core error types used throughout the signing
//! service. All errors are unified under the `AppError` enum which can
//! represent validation, storage, signing and other domain-specific errors.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like timeouts
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "SIGNING_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Path traversal rejected: {0}")]
    PathTraversal(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Certificate configuration error: {0}")]
    CertificateConfiguration(String),

    #[error("Signing tool unavailable: {0}")]
    SigningToolUnavailable(String),

    #[error("Signing timed out after {timeout_secs}s")]
    SigningTimeout { timeout_secs: u64 },

    #[error("Signing failed: {message}")]
    SigningFailed {
        message: String,
        /// Captured stderr of the signing tool
        diagnostics: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::UnsupportedFileType(_) => (
            400,
            "UNSUPPORTED_FILE_TYPE",
            false,
            Some("Upload an MP4, MOV or M4V video"),
            false,
            LogLevel::Debug,
        ),
        AppError::FileTooLarge(_) => (
            413,
            "FILE_TOO_LARGE",
            false,
            Some("Reduce file size and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidMetadata(_) => (
            400,
            "INVALID_METADATA",
            false,
            Some("Provide non-empty organization and ai_tool fields"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::PathTraversal(_) => (
            400,
            "PATH_TRAVERSAL",
            false,
            Some("Use a plain filename without path separators"),
            false,
            LogLevel::Warn,
        ),
        AppError::StorageUnavailable(_) => (
            500,
            "STORAGE_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::CertificateConfiguration(_) => (
            500,
            "CERTIFICATE_CONFIGURATION_ERROR",
            false,
            Some("Contact the service operator"),
            true,
            LogLevel::Error,
        ),
        AppError::SigningToolUnavailable(_) => (
            503,
            "SIGNING_TOOL_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::SigningTimeout { .. } => (
            504,
            "SIGNING_TIMEOUT",
            true,
            Some("Retry with a smaller file or after a short delay"),
            false,
            LogLevel::Warn,
        ),
        AppError::SigningFailed { .. } => (
            500,
            "SIGNING_FAILED",
            false,
            Some("Check that the file is a valid video and try again"),
            false,
            LogLevel::Error,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the file name returned by the signing request"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::UnsupportedFileType(_) => "UnsupportedFileType",
            AppError::FileTooLarge(_) => "FileTooLarge",
            AppError::InvalidMetadata(_) => "InvalidMetadata",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PathTraversal(_) => "PathTraversal",
            AppError::StorageUnavailable(_) => "StorageUnavailable",
            AppError::CertificateConfiguration(_) => "CertificateConfiguration",
            AppError::SigningToolUnavailable(_) => "SigningToolUnavailable",
            AppError::SigningTimeout { .. } => "SigningTimeout",
            AppError::SigningFailed { .. } => "SigningFailed",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain and tool diagnostics
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        if let AppError::SigningFailed { diagnostics, .. } = self {
            if !diagnostics.is_empty() {
                details.push_str(&format!("\n  Tool output: {}", diagnostics));
            }
        }

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::UnsupportedFileType(ref msg) => msg.clone(),
            AppError::FileTooLarge(ref msg) => msg.clone(),
            AppError::InvalidMetadata(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::PathTraversal(_) => "Filename contains invalid path components".to_string(),
            AppError::StorageUnavailable(_) => "Failed to access storage".to_string(),
            AppError::CertificateConfiguration(_) => {
                "Signing certificate is not configured correctly".to_string()
            }
            AppError::SigningToolUnavailable(_) => "Signing tool is not available".to_string(),
            AppError::SigningTimeout { timeout_secs } => {
                format!("Signing did not complete within {} seconds", timeout_secs)
            }
            AppError::SigningFailed { ref message, .. } => message.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
