use std::env;
use std::fmt::{self, Debug};
use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_EXPIRATION, GOOGLE_APPLICATION_CREDENTIALS, GOOGLE_STORAGE_BASE_URL,
};

/// Config carries everything needed to build a [`UrlSigner`](crate::UrlSigner).
///
/// Validation happens in [`UrlSigner::from_config`](crate::UrlSigner::from_config).
#[derive(Clone)]
pub struct Config {
    /// Client email used as `GoogleAccessId`.
    ///
    /// Overrides the one in the service account credential.
    pub client_email: Option<String>,
    /// PEM encoded RSA private key.
    pub private_key: Option<String>,
    /// Service account credential content.
    pub credential_content: Option<String>,
    /// Service account credential file path.
    pub credential_path: Option<String>,
    /// Base url of the storage service.
    pub base_url: String,
    /// Validity window used by the convenience methods.
    pub default_expiration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_email: None,
            private_key: None,
            credential_content: None,
            credential_path: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_expiration: DEFAULT_EXPIRATION,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_email", &self.client_email)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field(
                "credential_content",
                &self.credential_content.as_ref().map(|_| "<redacted>"),
            )
            .field("credential_path", &self.credential_path)
            .field("base_url", &self.base_url)
            .field("default_expiration", &self.default_expiration)
            .finish()
    }
}

impl Config {
    /// Create a new config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set client email.
    pub fn with_client_email(mut self, client_email: impl Into<String>) -> Self {
        self.client_email = Some(client_email.into());
        self
    }

    /// Set PEM encoded private key.
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Set credential content.
    pub fn with_credential_content(mut self, content: impl Into<String>) -> Self {
        self.credential_content = Some(content.into());
        self
    }

    /// Set credential file path.
    pub fn with_credential_path(mut self, path: impl Into<String>) -> Self {
        self.credential_path = Some(path.into());
        self
    }

    /// Set the base url.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default expiration.
    pub fn with_default_expiration(mut self, expiration: Duration) -> Self {
        self.default_expiration = expiration;
        self
    }

    /// Load config from environment variables.
    ///
    /// - `GOOGLE_APPLICATION_CREDENTIALS`: credential file path
    /// - `GOOGLE_STORAGE_BASE_URL`: base url
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = env::var(GOOGLE_APPLICATION_CREDENTIALS) {
            cfg.credential_path = Some(v);
        }

        if let Ok(v) = env::var(GOOGLE_STORAGE_BASE_URL) {
            cfg.base_url = v;
        }

        cfg
    }
}
