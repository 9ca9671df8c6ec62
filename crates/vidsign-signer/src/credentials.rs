//! Signer certificate chain and private key, validated once at startup.

use rustls_pemfile::Item;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{SignerError, SignerResult};

/// Signature algorithms accepted by c2patool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningAlg {
    Es256,
    Es384,
    Es512,
    Ps256,
    Ps384,
    Ps512,
    Ed25519,
}

impl FromStr for SigningAlg {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es256" => Ok(SigningAlg::Es256),
            "es384" => Ok(SigningAlg::Es384),
            "es512" => Ok(SigningAlg::Es512),
            "ps256" => Ok(SigningAlg::Ps256),
            "ps384" => Ok(SigningAlg::Ps384),
            "ps512" => Ok(SigningAlg::Ps512),
            "ed25519" => Ok(SigningAlg::Ed25519),
            other => Err(SignerError::CertificateConfiguration(format!(
                "Unsupported signing algorithm '{}'",
                other
            ))),
        }
    }
}

impl Display for SigningAlg {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            SigningAlg::Es256 => "es256",
            SigningAlg::Es384 => "es384",
            SigningAlg::Es512 => "es512",
            SigningAlg::Ps256 => "ps256",
            SigningAlg::Ps384 => "ps384",
            SigningAlg::Ps512 => "ps512",
            SigningAlg::Ed25519 => "ed25519",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct SignerCredentials {
    cert_chain_path: PathBuf,
    private_key_path: PathBuf,
    alg: SigningAlg,
    chain_len: usize,
}

impl SignerCredentials {
    /// Read and check the PEM material.
    ///
    /// The chain must hold at least one `CERTIFICATE` block (leaf first) and
    /// the key file a PKCS#8 `PRIVATE KEY` block. Paths are canonicalized so
    /// the tool receives absolute paths.
    pub fn load(cert_chain_path: &Path, private_key_path: &Path, alg: &str) -> SignerResult<Self> {
        let alg = alg.parse::<SigningAlg>()?;

        let cert_chain_path = canonical(cert_chain_path, "certificate chain")?;
        let private_key_path = canonical(private_key_path, "private key")?;

        let chain_len = count_certificates(&read_pem(&cert_chain_path, "certificate chain")?)?;
        if chain_len == 0 {
            return Err(SignerError::CertificateConfiguration(format!(
                "No CERTIFICATE block found in {}",
                cert_chain_path.display()
            )));
        }

        check_pkcs8_key(&read_pem(&private_key_path, "private key")?)?;

        tracing::info!(
            cert_chain = %cert_chain_path.display(),
            private_key = %private_key_path.display(),
            alg = %alg,
            chain_len,
            "Signer credentials loaded"
        );

        Ok(Self {
            cert_chain_path,
            private_key_path,
            alg,
            chain_len,
        })
    }

    pub fn cert_chain_path(&self) -> &Path {
        &self.cert_chain_path
    }

    pub fn private_key_path(&self) -> &Path {
        &self.private_key_path
    }

    pub fn alg(&self) -> SigningAlg {
        self.alg
    }

    pub fn chain_len(&self) -> usize {
        self.chain_len
    }
}

fn canonical(path: &Path, what: &str) -> SignerResult<PathBuf> {
    path.canonicalize().map_err(|e| {
        SignerError::CertificateConfiguration(format!(
            "Cannot access {} at {}: {}",
            what,
            path.display(),
            e
        ))
    })
}

fn read_pem(path: &Path, what: &str) -> SignerResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        SignerError::CertificateConfiguration(format!(
            "Cannot read {} at {}: {}",
            what,
            path.display(),
            e
        ))
    })
}

fn count_certificates(pem: &[u8]) -> SignerResult<usize> {
    let mut count = 0;
    for item in rustls_pemfile::read_all(&mut &pem[..]) {
        let item = item.map_err(|e| {
            SignerError::CertificateConfiguration(format!("Malformed certificate chain: {}", e))
        })?;
        if let Item::X509Certificate(_) = item {
            count += 1;
        }
    }
    Ok(count)
}

fn check_pkcs8_key(pem: &[u8]) -> SignerResult<()> {
    let mut other_key = false;
    for item in rustls_pemfile::read_all(&mut &pem[..]) {
        match item {
            Ok(Item::Pkcs8Key(_)) => return Ok(()),
            Ok(Item::Pkcs1Key(_)) | Ok(Item::Sec1Key(_)) => other_key = true,
            Ok(_) => {}
            Err(e) => {
                return Err(SignerError::CertificateConfiguration(format!(
                    "Malformed private key: {}",
                    e
                )))
            }
        }
    }

    let message = if other_key {
        "Private key must be PKCS#8 (BEGIN PRIVATE KEY)"
    } else {
        "No private key found"
    };
    Err(SignerError::CertificateConfiguration(message.to_string()))
}
