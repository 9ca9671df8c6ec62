//! Startup configuration checks

use anyhow::Result;
use std::str::FromStr;
use vidsign_core::Config;
use vidsign_infra::LogFormat;

/// Validate configuration, on top of [`Config::validate`], for the HTTP
/// surface. Runs after telemetry is installed so warnings are visible.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    LogFormat::from_str(config.log_format()).map_err(|e| anyhow::anyhow!(e))?;

    let allows_any_origin = config.cors_origins().iter().any(|o| o == "*");

    if config.is_production() {
        if allows_any_origin {
            anyhow::bail!("CORS_ORIGINS must not contain '*' in production");
        }
        if config.public_base_url().contains("localhost") {
            tracing::warn!(
                public_base_url = %config.public_base_url(),
                "PUBLIC_BASE_URL points at localhost in production; download links will not resolve for clients"
            );
        }
    } else if allows_any_origin {
        tracing::warn!("CORS_ORIGINS is '*'; any origin may call the API");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidsign_core::{BaseConfig, SigningServiceConfig};

    fn config(environment: &str, cors_origins: &[&str]) -> Config {
        Config::new(SigningServiceConfig {
            base: BaseConfig {
                app_name: "C2PA Video Signing Service".to_string(),
                app_version: "0.1.0".to_string(),
                host: "0.0.0.0".to_string(),
                server_port: 8000,
                public_base_url: "https://sign.example.com".to_string(),
                cors_origins: cors_origins.iter().map(|o| o.to_string()).collect(),
                environment: environment.to_string(),
                http_concurrency_limit: 1024,
                log_format: "json".to_string(),
            },
            upload_dir: "files/uploads".into(),
            output_dir: "files/signed".into(),
            manifest_dir: "files/manifests".into(),
            max_file_size_bytes: 500 * 1024 * 1024,
            allowed_extensions: vec!["mp4".to_string()],
            c2patool_path: "c2patool".to_string(),
            signing_timeout_secs: 300,
            cert_chain_path: "certificates/certificate.pem".into(),
            private_key_path: "certificates/private_key.pem".into(),
            signing_alg: "es256".to_string(),
        })
    }

    #[test]
    fn test_any_origin_allowed_outside_production() {
        assert!(validate_config(&config("development", &["*"])).is_ok());
    }

    #[test]
    fn test_any_origin_rejected_in_production() {
        assert!(validate_config(&config("production", &["*"])).is_err());
        assert!(validate_config(&config("production", &["https://app.example.com"])).is_ok());
    }
}
