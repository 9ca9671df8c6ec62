//! Validation modules
//!
//! Pure checks applied to an upload before anything touches the disk.

pub mod metadata;
pub mod upload;

pub use metadata::{
    sanitize_text, RawMetadata, MAX_AI_TOOL_LENGTH, MAX_DESCRIPTION_LENGTH,
    MAX_ORGANIZATION_LENGTH, MAX_TITLE_LENGTH,
};
pub use upload::UploadValidator;

use crate::error::AppError;

/// Rejections produced by [`UploadValidator`].
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No filename provided for the uploaded file")]
    MissingFilename,

    #[error("Filename '{0}' contains path separators or control characters")]
    UnsafeFilename(String),

    #[error("File has no extension (allowed: {allowed:?})")]
    MissingExtension { allowed: Vec<String> },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Empty file")]
    EmptyFile,

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Field '{0}' is empty after removing disallowed characters")]
    EmptyField(&'static str),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingFilename | ValidationError::EmptyFile => {
                AppError::InvalidInput(err.to_string())
            }
            ValidationError::UnsafeFilename(_) => AppError::PathTraversal(err.to_string()),
            ValidationError::MissingExtension { .. } | ValidationError::InvalidExtension { .. } => {
                AppError::UnsupportedFileType(err.to_string())
            }
            ValidationError::FileTooLarge { max, .. } => AppError::FileTooLarge(format!(
                "File exceeds the maximum size of {} MB",
                max / (1024 * 1024)
            )),
            ValidationError::MissingField(_) | ValidationError::EmptyField(_) => {
                AppError::InvalidMetadata(err.to_string())
            }
        }
    }
}
