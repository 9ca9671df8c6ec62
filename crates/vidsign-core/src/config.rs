//! Configuration module
//!
//! Configuration is read once from the environment (and an optional `.env`
//! file) at startup, validated, and then shared read-only with every
//! component that needs it.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

// Common constants
const DEFAULT_APP_NAME: &str = "C2PA Video Signing Service";
const DEFAULT_PORT: u16 = 8000;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const MAX_FILE_SIZE_MB: u64 = 500;
const SIGNING_TIMEOUT_SECS: u64 = 300;

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub app_name: String,
    pub app_version: String,
    pub host: String,
    pub server_port: u16,
    /// Base URL used to build download links (no trailing slash)
    pub public_base_url: String,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub log_format: String,
}

/// Signing service configuration
#[derive(Clone, Debug)]
pub struct SigningServiceConfig {
    pub base: BaseConfig,
    // Storage roots
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub manifest_dir: PathBuf,
    // Upload limits
    pub max_file_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
    // External signing tool
    pub c2patool_path: String,
    pub signing_timeout_secs: u64,
    pub cert_chain_path: PathBuf,
    pub private_key_path: PathBuf,
    pub signing_alg: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<SigningServiceConfig>);

impl Config {
    pub fn new(config: SigningServiceConfig) -> Self {
        Config(Box::new(config))
    }

    fn inner(&self) -> &SigningServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = SigningServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn app_name(&self) -> &str {
        &self.inner().base.app_name
    }

    pub fn app_version(&self) -> &str {
        &self.inner().base.app_version
    }

    pub fn host(&self) -> &str {
        &self.inner().base.host
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn public_base_url(&self) -> &str {
        &self.inner().base.public_base_url
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.inner().base.log_format
    }

    pub fn upload_dir(&self) -> &Path {
        &self.inner().upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.inner().output_dir
    }

    pub fn manifest_dir(&self) -> &Path {
        &self.inner().manifest_dir
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.inner().max_file_size_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.inner().allowed_extensions
    }

    pub fn c2patool_path(&self) -> &str {
        &self.inner().c2patool_path
    }

    pub fn signing_timeout(&self) -> Duration {
        Duration::from_secs(self.inner().signing_timeout_secs)
    }

    pub fn cert_chain_path(&self) -> &Path {
        &self.inner().cert_chain_path
    }

    pub fn private_key_path(&self) -> &Path {
        &self.inner().private_key_path
    }

    pub fn signing_alg(&self) -> &str {
        &self.inner().signing_alg
    }

    /// `claim_generator` value written into every manifest
    pub fn claim_generator(&self) -> String {
        format!("{}/{}", self.app_name(), self.app_version())
    }
}

/// Parse `value` as read from `name`. Only an unset variable falls back to
/// `default`; a malformed one is an error.
fn parse_var<T: FromStr>(
    name: &str,
    value: Option<String>,
    default: T,
) -> Result<T, anyhow::Error> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", name, raw)),
    }
}

fn env_number<T: FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    parse_var(name, env::var(name).ok(), default)
}

fn megabytes_to_bytes(mb: u64) -> Result<u64, anyhow::Error> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large: {}", mb))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl SigningServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port: u16 = env_number("PORT", DEFAULT_PORT)?;

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port))
            .trim_end_matches('/')
            .to_string();

        let base = BaseConfig {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string()),
            app_version: env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port,
            public_base_url,
            cors_origins,
            environment,
            http_concurrency_limit: env_number("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "compact".to_string())
                .to_lowercase(),
        };

        let max_file_size_mb: u64 = env_number("MAX_FILE_SIZE_MB", MAX_FILE_SIZE_MB)?;

        let config = SigningServiceConfig {
            base,
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "./files/uploads".to_string())
                .into(),
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "./files/signed".to_string())
                .into(),
            manifest_dir: env::var("MANIFEST_DIR")
                .unwrap_or_else(|_| "./files/manifests".to_string())
                .into(),
            max_file_size_bytes: megabytes_to_bytes(max_file_size_mb)?,
            allowed_extensions: split_list(
                &env::var("ALLOWED_EXTENSIONS").unwrap_or_else(|_| "mp4,mov,m4v".to_string()),
            ),
            c2patool_path: env::var("C2PATOOL_PATH").unwrap_or_else(|_| "c2patool".to_string()),
            signing_timeout_secs: env_number("SIGNING_TIMEOUT_SECS", SIGNING_TIMEOUT_SECS)?,
            cert_chain_path: env::var("CERT_CHAIN_PATH")
                .unwrap_or_else(|_| "./certificates/certificate.pem".to_string())
                .into(),
            private_key_path: env::var("PRIVATE_KEY_PATH")
                .unwrap_or_else(|_| "./certificates/private_key.pem".to_string())
                .into(),
            signing_alg: env::var("SIGNING_ALG")
                .unwrap_or_else(|_| "es256".to_string())
                .to_lowercase(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB cannot be 0"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS cannot be empty"));
        }

        if let Some(ext) = self
            .allowed_extensions
            .iter()
            .find(|ext| !ext.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS entry '{}' must be alphanumeric",
                ext
            ));
        }

        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        if self.signing_timeout_secs == 0 {
            return Err(anyhow::anyhow!("SIGNING_TIMEOUT_SECS cannot be 0"));
        }

        if self.c2patool_path.trim().is_empty() {
            return Err(anyhow::anyhow!("C2PATOOL_PATH cannot be empty"));
        }

        if !self.base.public_base_url.starts_with("http://")
            && !self.base.public_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "PUBLIC_BASE_URL must start with http:// or https://"
            ));
        }

        let roots = [&self.upload_dir, &self.output_dir, &self.manifest_dir];
        for (i, a) in roots.iter().enumerate() {
            for b in roots.iter().skip(i + 1) {
                if a == b {
                    return Err(anyhow::anyhow!(
                        "UPLOAD_DIR, OUTPUT_DIR and MANIFEST_DIR must be distinct directories ({} is used twice)",
                        a.display()
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SigningServiceConfig {
        SigningServiceConfig {
            base: BaseConfig {
                app_name: DEFAULT_APP_NAME.to_string(),
                app_version: "1.0.0".to_string(),
                host: "127.0.0.1".to_string(),
                server_port: 8000,
                public_base_url: "http://localhost:8000".to_string(),
                cors_origins: vec!["*".to_string()],
                environment: "test".to_string(),
                http_concurrency_limit: 16,
                log_format: "compact".to_string(),
            },
            upload_dir: "uploads".into(),
            output_dir: "signed".into(),
            manifest_dir: "manifests".into(),
            max_file_size_bytes: 500 * 1024 * 1024,
            allowed_extensions: vec!["mp4".into(), "mov".into(), "m4v".into()],
            c2patool_path: "c2patool".to_string(),
            signing_timeout_secs: 300,
            cert_chain_path: "certs/chain.pem".into(),
            private_key_path: "certs/key.pem".into(),
            signing_alg: "es256".to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_shared_storage_roots_rejected() {
        let mut config = test_config();
        config.manifest_dir = config.output_dir.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = test_config();
        config.signing_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_with_separator_rejected() {
        let mut config = test_config();
        config.allowed_extensions.push("mp4/../x".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_claim_generator_format() {
        let config = Config::new(test_config());
        assert_eq!(config.claim_generator(), "C2PA Video Signing Service/1.0.0");
        assert!(!config.is_production());
    }

    #[test]
    fn test_zero_concurrency_limit_rejected() {
        let mut config = test_config();
        config.base.http_concurrency_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_var_unset_uses_default() {
        assert_eq!(parse_var("SIGNING_TIMEOUT_SECS", None, 300u64).unwrap(), 300);
        assert_eq!(
            parse_var("SIGNING_TIMEOUT_SECS", Some(" 45 ".to_string()), 300u64).unwrap(),
            45
        );
    }

    #[test]
    fn test_parse_var_malformed_fails() {
        let err = parse_var("MAX_FILE_SIZE_MB", Some("500MB".to_string()), 500u64).unwrap_err();
        assert!(err.to_string().contains("MAX_FILE_SIZE_MB"));
        assert!(parse_var("HTTP_CONCURRENCY_LIMIT", Some("-1".to_string()), 1024usize).is_err());
        assert!(parse_var("PORT", Some("70000".to_string()), 8000u16).is_err());
    }

    #[test]
    fn test_megabytes_to_bytes_overflow() {
        assert_eq!(megabytes_to_bytes(500).unwrap(), 500 * 1024 * 1024);
        assert!(megabytes_to_bytes(u64::MAX / 1024).is_err());
    }

    #[test]
    fn test_split_list_normalizes() {
        assert_eq!(split_list(" MP4, mov ,,M4V"), vec!["mp4", "mov", "m4v"]);
    }
}
