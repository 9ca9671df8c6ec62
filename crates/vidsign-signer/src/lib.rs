//! Vidsign Signer Library
//!
//! Embeds content credentials into videos by driving the external `c2patool`
//! binary. The HTTP layer only sees the [`ProvenanceSigner`] trait.

pub mod credentials;
pub mod error;
pub mod manifest;
pub mod tool;

pub use credentials::{SignerCredentials, SigningAlg};
pub use error::{SignerError, SignerResult};
pub use tool::{C2paTool, ToolOutput};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use utoipa::ToSchema;
use vidsign_core::{Config, SigningMetadata};
use vidsign_storage::StoredFile;

/// Everything needed to sign one staged upload.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    pub input: StoredFile,
    pub output: StoredFile,
    pub manifest: StoredFile,
    pub metadata: SigningMetadata,
    pub signed_at: DateTime<Utc>,
}

/// Files produced by a successful signing run.
#[derive(Debug, Clone)]
pub struct SignedArtifacts {
    pub output: StoredFile,
    pub manifest: StoredFile,
}

pub type SigningResult = Result<SignedArtifacts, SignerError>;

/// Outcome of reading the credentials embedded in a video.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerificationReport {
    pub valid: bool,
    pub message: String,
    /// Manifest store report, or the tool's diagnostics when invalid
    #[schema(value_type = Object)]
    pub report: serde_json::Value,
}

#[async_trait]
pub trait ProvenanceSigner: Send + Sync {
    /// Sign `request.input` into `request.output` and write the manifest
    /// report to `request.manifest`.
    ///
    /// Callers own cleanup of all three files.
    async fn sign(&self, request: SigningRequest) -> SigningResult;

    /// Read back the credentials embedded in `path`.
    async fn verify(&self, path: &Path) -> SignerResult<VerificationReport>;
}

/// [`ProvenanceSigner`] backed by c2patool.
pub struct C2paSigner {
    tool: C2paTool,
    credentials: SignerCredentials,
    claim_generator: String,
}

impl C2paSigner {
    pub fn new(tool: C2paTool, credentials: SignerCredentials, claim_generator: String) -> Self {
        Self {
            tool,
            credentials,
            claim_generator,
        }
    }

    /// Load credentials and probe the tool; any failure aborts startup.
    pub async fn initialize(config: &Config) -> SignerResult<Self> {
        let credentials = SignerCredentials::load(
            config.cert_chain_path(),
            config.private_key_path(),
            config.signing_alg(),
        )?;

        let tool = C2paTool::new(config.c2patool_path(), config.signing_timeout());
        let version = tool.version().await?;

        tracing::info!(
            c2patool = %config.c2patool_path(),
            version = %version,
            timeout_secs = config.signing_timeout().as_secs(),
            "Signing tool available"
        );

        Ok(Self::new(tool, credentials, config.claim_generator()))
    }

    async fn extract_report(&self, signed: &StoredFile) -> SignerResult<String> {
        let out = self.tool.report(signed.path()).await?;
        if !out.success() {
            return Err(SignerError::from_tool_failure(
                "c2patool failed to read the signed manifest",
                out.status.code(),
                &out.stderr,
            ));
        }
        if out.stdout.trim().is_empty() {
            return Err(SignerError::Failed {
                message: "c2patool returned an empty manifest report".to_string(),
                stderr: out.stderr,
            });
        }
        Ok(out.stdout)
    }
}

#[async_trait]
impl ProvenanceSigner for C2paSigner {
    #[tracing::instrument(skip(self, request), fields(
        input = %request.input.filename(),
        output = %request.output.filename()
    ))]
    async fn sign(&self, request: SigningRequest) -> SigningResult {
        let start = std::time::Instant::now();

        let definition = manifest::build_definition(
            &self.claim_generator,
            &request.metadata,
            &self.credentials,
            request.signed_at,
        );
        let definition_file = manifest::write_definition(&definition).await?;

        let out = self
            .tool
            .sign(
                request.input.path(),
                definition_file.path(),
                request.output.path(),
            )
            .await?;

        if !out.success() {
            let err = SignerError::from_tool_failure(
                "c2patool failed to sign the video",
                out.status.code(),
                &out.stderr,
            );
            tracing::warn!(
                exit_code = ?out.status.code(),
                stderr = %out.stderr.trim(),
                "Signing failed"
            );
            return Err(err);
        }

        let signed_len = request.output.len().await.unwrap_or(0);
        if signed_len == 0 {
            return Err(SignerError::Failed {
                message: "Signed video file was not created or is empty".to_string(),
                stderr: out.stderr,
            });
        }

        let report = self.extract_report(&request.output).await?;
        request.manifest.write(report.as_bytes()).await?;

        tracing::info!(
            output_bytes = signed_len,
            manifest_bytes = report.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video signed"
        );

        Ok(SignedArtifacts {
            output: request.output,
            manifest: request.manifest,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn verify(&self, path: &Path) -> SignerResult<VerificationReport> {
        let out = self.tool.report(path).await?;

        if out.success() {
            let report = serde_json::from_str(&out.stdout)
                .unwrap_or_else(|_| serde_json::Value::String(out.stdout.trim().to_string()));
            Ok(VerificationReport {
                valid: true,
                message: "Video contains valid content credentials".to_string(),
                report,
            })
        } else {
            tracing::debug!(
                exit_code = ?out.status.code(),
                "No valid content credentials found"
            );
            Ok(VerificationReport {
                valid: false,
                message: "No valid content credentials found".to_string(),
                report: serde_json::Value::String(out.stderr.trim().to_string()),
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::credentials::tests::write_test_credentials;
    use std::time::Duration;
    use tempfile::TempDir;
    use vidsign_storage::{StorageLayout, StoredFileKind};

    /// Stand-in for c2patool: copies the input on sign, prints a report
    /// otherwise.
    const FAKE_TOOL: &str = r#"
if [ "$1" = "--version" ]; then echo "c2patool 0.9.12"; exit 0; fi
if [ "$2" = "-m" ]; then cp "$1" "$5"; exit 0; fi
echo '{"active_manifest":"urn:uuid:test","manifests":{}}'
"#;

    struct Fixture {
        _dir: TempDir,
        layout: StorageLayout,
        signer: C2paSigner,
    }

    async fn fixture(script: &str, timeout: Duration) -> Fixture {
        let dir = TempDir::new().unwrap();
        let (cert, key) = write_test_credentials(&dir);
        let credentials = SignerCredentials::load(&cert, &key, "es256").unwrap();

        let script_path = dir.path().join("c2patool.sh");
        std::fs::write(&script_path, script).unwrap();
        let tool = C2paTool::new("sh", timeout).with_leading_args([script_path]);

        let layout = StorageLayout::new(
            dir.path().join("uploads"),
            dir.path().join("signed"),
            dir.path().join("manifests"),
        )
        .await
        .unwrap();

        Fixture {
            _dir: dir,
            layout,
            signer: C2paSigner::new(tool, credentials, "Test/1.0".to_string()),
        }
    }

    async fn request(layout: &StorageLayout) -> SigningRequest {
        let input = layout
            .resolve(StoredFileKind::Input, "upload-1.mp4")
            .unwrap();
        input.write(b"fake video bytes").await.unwrap();
        SigningRequest {
            input,
            output: layout
                .resolve(StoredFileKind::Output, "video-signed-1.mp4")
                .unwrap(),
            manifest: layout
                .resolve(StoredFileKind::Manifest, "video-signed-1.manifest.json")
                .unwrap(),
            metadata: SigningMetadata {
                organization: "Acme".to_string(),
                ai_tool: "Veo 3".to_string(),
                title: None,
                description: None,
            },
            signed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sign_produces_both_artifacts() {
        let fx = fixture(FAKE_TOOL, Duration::from_secs(10)).await;
        let req = request(&fx.layout).await;

        let artifacts = fx.signer.sign(req).await.unwrap();

        assert_eq!(
            std::fs::read(artifacts.output.path()).unwrap(),
            b"fake video bytes"
        );
        let report: serde_json::Value =
            serde_json::from_slice(&std::fs::read(artifacts.manifest.path()).unwrap()).unwrap();
        assert_eq!(report["active_manifest"], "urn:uuid:test");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_signing_failure() {
        let fx = fixture("echo 'Error: unsupported asset' >&2\nexit 1\n", Duration::from_secs(10)).await;
        let req = request(&fx.layout).await;
        let manifest = req.manifest.clone();

        let err = fx.signer.sign(req).await.unwrap_err();
        match err {
            SignerError::Failed { stderr, .. } => assert!(stderr.contains("unsupported asset")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(!manifest.exists().await);
    }

    #[tokio::test]
    async fn test_certificate_complaint_classified() {
        let fx = fixture(
            "echo 'Error: invalid certificate chain' >&2\nexit 1\n",
            Duration::from_secs(10),
        )
        .await;
        let req = request(&fx.layout).await;

        let err = fx.signer.sign(req).await.unwrap_err();
        assert!(matches!(err, SignerError::CertificateConfiguration(_)));
    }

    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let fx = fixture(": > \"$5\"\nexit 0\n", Duration::from_secs(10)).await;
        let req = request(&fx.layout).await;
        let manifest = req.manifest.clone();

        let err = fx.signer.sign(req).await.unwrap_err();
        assert!(matches!(err, SignerError::Failed { .. }));
        assert!(!manifest.exists().await);
    }

    #[tokio::test]
    async fn test_timeout_reported() {
        let fx = fixture("sleep 10\n", Duration::from_millis(200)).await;
        let req = request(&fx.layout).await;

        let err = fx.signer.sign(req).await.unwrap_err();
        assert!(matches!(err, SignerError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_verify_valid_and_invalid() {
        let fx = fixture(FAKE_TOOL, Duration::from_secs(10)).await;
        let report = fx.signer.verify(Path::new("/any.mp4")).await.unwrap();
        assert!(report.valid);
        assert_eq!(report.report["active_manifest"], "urn:uuid:test");

        let fx = fixture("echo 'No claim found' >&2\nexit 1\n", Duration::from_secs(10)).await;
        let report = fx.signer.verify(Path::new("/any.mp4")).await.unwrap();
        assert!(!report.valid);
        assert_eq!(report.report, serde_json::json!("No claim found"));
    }
}
