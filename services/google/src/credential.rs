use std::fmt::{self, Debug};
use std::path::Path;

use log::debug;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use urlsign_core::{Error, Result};

/// ServiceAccount holds the client email and private key of a service account.
///
/// It deserializes from the JSON credential file issued by Google Cloud,
/// other fields of that file are ignored.
#[derive(Clone, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceAccount {
    /// Private key of credential, PEM encoded.
    pub private_key: String,
    /// The client email of credential
    pub client_email: String,
}

impl Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ServiceAccount {
    /// Parse a service account from the content of a JSON credential file.
    pub fn from_slice(v: &[u8]) -> Result<Self> {
        let sa: ServiceAccount = serde_json::from_slice(v)?;
        debug!("loaded service account: {}", sa.client_email);
        Ok(sa)
    }

    /// Read and parse a JSON credential file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| {
            Error::unexpected(format!(
                "failed to read credential file {}",
                path.display()
            ))
            .with_source(e)
        })?;
        Self::from_slice(&content)
    }

    /// Parse the private key held by this service account.
    pub fn rsa_private_key(&self) -> Result<RsaPrivateKey> {
        parse_private_key_pem(&self.private_key)
    }
}

/// Parse a PEM encoded RSA private key.
///
/// Both PKCS#8 (`BEGIN PRIVATE KEY`) and PKCS#1 (`BEGIN RSA PRIVATE KEY`)
/// encodings are accepted.
pub fn parse_private_key_pem(pem: &str) -> Result<RsaPrivateKey> {
    match RsaPrivateKey::from_pkcs8_pem(pem) {
        Ok(key) => Ok(key),
        Err(pkcs8_err) => RsaPrivateKey::from_pkcs1_pem(pem).map_err(|pkcs1_err| {
            debug!("private key is neither pkcs8 ({pkcs8_err}) nor pkcs1 ({pkcs1_err})");
            Error::credential_invalid("failed to parse RSA private key").with_source(pkcs8_err)
        }),
    }
}
