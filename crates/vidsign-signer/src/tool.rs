//! c2patool subprocess wrapper

use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::error::{SignerError, SignerResult};

/// Captured result of one c2patool run.
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Invokes the c2patool binary.
///
/// Arguments are passed directly to the child, never through a shell. Each
/// run is bounded by `timeout`; an expired child is killed.
#[derive(Debug, Clone)]
pub struct C2paTool {
    program: OsString,
    leading_args: Vec<OsString>,
    timeout: Duration,
}

impl C2paTool {
    pub fn new(program: impl Into<OsString>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout,
        }
    }

    /// Arguments placed before every invocation, e.g. a script for an
    /// interpreter given as `program`.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe the binary with `--version`.
    pub async fn version(&self) -> SignerResult<String> {
        let output = self.run(&[OsStr::new("--version")]).await?;
        if !output.success() {
            return Err(SignerError::ToolUnavailable(format!(
                "c2patool --version exited with {}: {}",
                output.status,
                output.stderr.trim()
            )));
        }
        Ok(output.stdout.trim().to_string())
    }

    /// `c2patool <input> -m <definition> -o <output> -f`
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "c2patool",
        c2patool.operation = "sign"
    ))]
    pub async fn sign(
        &self,
        input: &Path,
        definition: &Path,
        output: &Path,
    ) -> SignerResult<ToolOutput> {
        self.run(&[
            input.as_os_str(),
            OsStr::new("-m"),
            definition.as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
            OsStr::new("-f"),
        ])
        .await
    }

    /// `c2patool <path>`: prints the manifest store report as JSON.
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "c2patool",
        c2patool.operation = "report"
    ))]
    pub async fn report(&self, path: &Path) -> SignerResult<ToolOutput> {
        self.run(&[path.as_os_str()]).await
    }

    async fn run(&self, args: &[&OsStr]) -> SignerResult<ToolOutput> {
        let start = Instant::now();

        let child = Command::new(&self.program)
            .args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => SignerError::ToolUnavailable(
                    format!("Failed to start {}: {}", self.program.to_string_lossy(), e),
                ),
                _ => SignerError::Failed {
                    message: "Failed to start c2patool".to_string(),
                    stderr: e.to_string(),
                },
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| SignerError::Failed {
                message: "Failed to collect c2patool output".to_string(),
                stderr: e.to_string(),
            })?,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "c2patool timed out and was killed"
                );
                return Err(SignerError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                });
            }
        };

        let duration = start.elapsed();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        tracing::debug!(
            exit_code = ?output.status.code(),
            duration_ms = duration.as_secs_f64() * 1000.0,
            stderr_len = stderr.len(),
            "c2patool finished"
        );

        Ok(ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
            duration,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script_tool(dir: &TempDir, body: &str, timeout: Duration) -> C2paTool {
        let script = dir.path().join("c2patool.sh");
        std::fs::write(&script, body).unwrap();
        C2paTool::new("sh", timeout).with_leading_args([script])
    }

    #[tokio::test]
    async fn test_version_probe() {
        let dir = TempDir::new().unwrap();
        let tool = script_tool(&dir, "echo 'c2patool 0.9.12'\n", Duration::from_secs(5));
        assert_eq!(tool.version().await.unwrap(), "c2patool 0.9.12");
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let tool = C2paTool::new("/nonexistent/c2patool", Duration::from_secs(5));
        assert!(matches!(
            tool.version().await,
            Err(SignerError::ToolUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_argument_order() {
        let dir = TempDir::new().unwrap();
        let tool = script_tool(&dir, "echo \"$@\"\n", Duration::from_secs(5));

        let out = tool
            .sign(
                Path::new("/in.mp4"),
                Path::new("/def.json"),
                Path::new("/out.mp4"),
            )
            .await
            .unwrap();

        assert!(out.success());
        assert_eq!(out.stdout.trim(), "/in.mp4 -m /def.json -o /out.mp4 -f");
    }

    #[tokio::test]
    async fn test_stderr_and_exit_code_captured() {
        let dir = TempDir::new().unwrap();
        let tool = script_tool(&dir, "echo 'bad input' >&2\nexit 3\n", Duration::from_secs(5));

        let out = tool.report(Path::new("/x.mp4")).await.unwrap();
        assert_eq!(out.status.code(), Some(3));
        assert_eq!(out.stderr.trim(), "bad input");
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let dir = TempDir::new().unwrap();
        let tool = script_tool(&dir, "sleep 10\n", Duration::from_millis(200));

        let start = Instant::now();
        let result = tool.report(Path::new("/x.mp4")).await;
        assert!(matches!(result, Err(SignerError::Timeout { .. })));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
