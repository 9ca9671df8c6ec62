//! In-process stand-in for the c2patool signer.

use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;
use vidsign_signer::{
    ProvenanceSigner, SignedArtifacts, SignerError, SignerResult, SigningRequest, SigningResult,
    VerificationReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubBehavior {
    /// Copy input to output and write a manifest report
    Succeed,
    /// Write both artifacts, then report failure
    FailAfterOutput,
    /// Report a timeout without writing anything
    Timeout,
    /// Report a certificate problem
    BadCertificate,
    /// Announce on `started`, wait for `release`, then succeed
    Gated,
}

pub struct StubSigner {
    behavior: StubBehavior,
    calls: AtomicUsize,
    inputs_seen: Mutex<Vec<PathBuf>>,
    pub started: Notify,
    pub release: Notify,
}

impl StubSigner {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            inputs_seen: Mutex::new(Vec::new()),
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Staged inputs handed to the signer, in call order
    pub fn inputs_seen(&self) -> Vec<PathBuf> {
        self.inputs_seen.lock().unwrap().clone()
    }

    async fn write_artifacts(request: &SigningRequest) -> SignerResult<()> {
        tokio::fs::copy(request.input.path(), request.output.path())
            .await
            .map_err(|e| SignerError::Failed {
                message: format!("copy failed: {}", e),
                stderr: String::new(),
            })?;

        let report = json!({
            "active_manifest": "urn:uuid:stub",
            "manifests": {
                "urn:uuid:stub": {
                    "title": "AI Generated Content Credentials",
                    "creator": request.metadata.organization,
                    "software_agent": request.metadata.ai_tool,
                }
            }
        });
        request.manifest.write(report.to_string().as_bytes()).await?;
        Ok(())
    }
}

#[async_trait]
impl ProvenanceSigner for StubSigner {
    async fn sign(&self, request: SigningRequest) -> SigningResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(request.input.path().exists(), "staged input missing");
        self.inputs_seen
            .lock()
            .unwrap()
            .push(request.input.path().to_path_buf());

        match self.behavior {
            StubBehavior::Succeed => {
                Self::write_artifacts(&request).await?;
                Ok(SignedArtifacts {
                    output: request.output,
                    manifest: request.manifest,
                })
            }
            StubBehavior::FailAfterOutput => {
                Self::write_artifacts(&request).await?;
                Err(SignerError::Failed {
                    message: "c2patool failed to sign video (exit code 1)".to_string(),
                    stderr: "Error: unsupported format".to_string(),
                })
            }
            StubBehavior::Gated => {
                self.started.notify_one();
                self.release.notified().await;
                Self::write_artifacts(&request).await?;
                Ok(SignedArtifacts {
                    output: request.output,
                    manifest: request.manifest,
                })
            }
            StubBehavior::Timeout => Err(SignerError::Timeout { timeout_secs: 5 }),
            StubBehavior::BadCertificate => Err(SignerError::CertificateConfiguration(
                "could not parse private key /secret/private_key.pem".to_string(),
            )),
        }
    }

    async fn verify(&self, path: &Path) -> SignerResult<VerificationReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs_seen.lock().unwrap().push(path.to_path_buf());

        match self.behavior {
            StubBehavior::Succeed => Ok(VerificationReport {
                valid: true,
                message: "Content credentials found".to_string(),
                report: json!({ "active_manifest": "urn:uuid:stub" }),
            }),
            _ => Ok(VerificationReport {
                valid: false,
                message: "No content credentials found".to_string(),
                report: json!("No claim found"),
            }),
        }
    }
}
