use thiserror::Error;
use vidsign_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Filename rejected: {0}")]
    PathTraversal(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PathTraversal(msg) => AppError::PathTraversal(msg),
            StorageError::NotFound(name) => AppError::NotFound(format!("File not found: {}", name)),
            StorageError::AlreadyExists(_)
            | StorageError::Unavailable(_)
            | StorageError::IoError(_) => AppError::StorageUnavailable(err.to_string()),
        }
    }
}
