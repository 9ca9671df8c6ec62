use thiserror::Error;
use vidsign_core::AppError;
use vidsign_storage::StorageError;

/// Signing operation errors
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("c2patool is not available: {0}")]
    ToolUnavailable(String),

    #[error("Certificate configuration error: {0}")]
    CertificateConfiguration(String),

    #[error("c2patool did not finish within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("{message}")]
    Failed { message: String, stderr: String },

    #[error("Failed to prepare manifest definition: {0}")]
    Definition(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for signing operations
pub type SignerResult<T> = Result<T, SignerError>;

/// Phrases in c2patool stderr that point at the signer material rather than
/// the input video.
const CERTIFICATE_COMPLAINTS: [&str; 8] = [
    "private key",
    "private_key",
    "sign_cert",
    "certificate chain",
    "signing certificate",
    "invalid certificate",
    "certificate has expired",
    ".pem",
];

impl SignerError {
    /// Classify a non-zero c2patool exit from its stderr.
    pub fn from_tool_failure(context: &str, exit_code: Option<i32>, stderr: &str) -> Self {
        let lowered = stderr.to_lowercase();
        if CERTIFICATE_COMPLAINTS.iter().any(|p| lowered.contains(p)) {
            return SignerError::CertificateConfiguration(stderr.trim().to_string());
        }

        let message = match exit_code {
            Some(code) => format!("{} (exit code {})", context, code),
            None => format!("{} (terminated by signal)", context),
        };
        SignerError::Failed {
            message,
            stderr: stderr.trim().to_string(),
        }
    }
}

impl From<SignerError> for AppError {
    fn from(err: SignerError) -> Self {
        match err {
            SignerError::ToolUnavailable(msg) => AppError::SigningToolUnavailable(msg),
            SignerError::CertificateConfiguration(msg) => AppError::CertificateConfiguration(msg),
            SignerError::Timeout { timeout_secs } => AppError::SigningTimeout { timeout_secs },
            SignerError::Failed { message, stderr } => AppError::SigningFailed {
                message,
                diagnostics: stderr,
            },
            SignerError::Definition(msg) => AppError::Internal(msg),
            SignerError::Storage(e) => e.into(),
        }
    }
}
