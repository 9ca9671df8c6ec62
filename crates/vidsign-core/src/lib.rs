//! Vidsign Core Library
//!
//! This crate provides the domain models, error types, configuration, upload
//! validation and job naming shared across all vidsign components.

pub mod config;
pub mod error;
pub mod models;
pub mod naming;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, SigningServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Job, JobId, JobOutcome, SigningMetadata, StoredFileKind};
pub use naming::JobNames;
pub use validation::{RawMetadata, UploadValidator, ValidationError};
