//! Manifest definition handed to c2patool with `-m`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tempfile::NamedTempFile;

use crate::credentials::SignerCredentials;
use crate::error::{SignerError, SignerResult};
use vidsign_core::SigningMetadata;

pub const DEFAULT_TITLE: &str = "AI Generated Content Credentials";
pub const TRAINED_ALGORITHMIC_MEDIA: &str =
    "http://cv.iptc.org/newscodes/digitalsourcetype/trainedAlgorithmicMedia";

pub fn build_definition(
    claim_generator: &str,
    metadata: &SigningMetadata,
    credentials: &SignerCredentials,
    signed_at: DateTime<Utc>,
) -> Value {
    let mut iptc = Map::new();
    iptc.insert("creator".into(), json!([metadata.organization]));
    iptc.insert("creditLine".into(), json!(metadata.organization));
    iptc.insert("digitalSourceType".into(), json!(TRAINED_ALGORITHMIC_MEDIA));
    if let Some(title) = &metadata.title {
        iptc.insert("headline".into(), json!(title));
    }
    if let Some(description) = &metadata.description {
        iptc.insert("caption".into(), json!(description));
    }

    json!({
        "claim_generator": claim_generator,
        "title": metadata.title.as_deref().unwrap_or(DEFAULT_TITLE),
        "alg": credentials.alg().to_string(),
        "sign_cert": credentials.cert_chain_path().to_string_lossy(),
        "private_key": credentials.private_key_path().to_string_lossy(),
        "assertions": [
            {
                "label": "c2pa.actions",
                "data": {
                    "actions": [
                        {
                            "action": "c2pa.created",
                            "softwareAgent": metadata.ai_tool,
                            "when": signed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                            "digitalSourceType": TRAINED_ALGORITHMIC_MEDIA,
                        }
                    ]
                }
            },
            {
                "label": "stds.iptc.photo-metadata",
                "data": iptc,
            }
        ]
    })
}

/// Write the definition to a temporary file, removed when the handle drops.
pub async fn write_definition(definition: &Value) -> SignerResult<NamedTempFile> {
    let body = serde_json::to_vec_pretty(definition)
        .map_err(|e| SignerError::Definition(e.to_string()))?;

    let temp_file = tempfile::Builder::new()
        .prefix("vidsign-manifest-")
        .suffix(".json")
        .tempfile()
        .map_err(|e| SignerError::Definition(e.to_string()))?;

    tokio::fs::write(temp_file.path(), body)
        .await
        .map_err(|e| SignerError::Definition(e.to_string()))?;

    Ok(temp_file)
}
