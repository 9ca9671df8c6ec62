use std::path::Path;

use super::metadata::{sanitize_text, RawMetadata};
use super::ValidationError;
use crate::config::Config;
use crate::models::SigningMetadata;

const MAX_ECHO_FILENAME_LENGTH: usize = 255;

/// Upload validator
///
/// Checks the declared filename, extension and size of an uploaded video and
/// cleans its metadata. Holds no state beyond the configured limits.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_file_size_bytes(),
            config.allowed_extensions().to_vec(),
        )
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Validate the declared filename of an upload and return its lowercase
    /// extension.
    pub fn validate_filename(&self, filename: Option<&str>) -> Result<String, ValidationError> {
        let filename = filename
            .filter(|f| !f.trim().is_empty())
            .ok_or(ValidationError::MissingFilename)?;

        if filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
            || filename.chars().any(|c| c.is_control())
        {
            return Err(ValidationError::UnsafeFilename(filename.to_string()));
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::MissingExtension {
                allowed: self.allowed_extensions.clone(),
            })?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }

    /// Validate the final size of a fully received upload.
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        self.check_size_limit(size)
    }

    /// Checked while streaming, after every chunk.
    pub fn check_size_limit(&self, received: u64) -> Result<(), ValidationError> {
        if received > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: received,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn sanitize_metadata(&self, raw: &RawMetadata) -> Result<SigningMetadata, ValidationError> {
        raw.sanitize()
    }

    /// Clean a client filename for echoing back in responses.
    pub fn echo_filename(&self, filename: &str) -> String {
        sanitize_text(filename, MAX_ECHO_FILENAME_LENGTH)
    }
}
