use std::fmt::{self, Debug};
use std::time::Duration;

use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;
use rand::thread_rng;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use urlsign_core::hash::base64_encode;
use urlsign_core::time::{self, DateTime};
use urlsign_core::{Error, Result};

use crate::canonical::SignableRequest;
use crate::config::Config;
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_EXPIRATION, EXPIRES, GOOGLE_ACCESS_ID, GOOG_QUERY_ENCODE_SET,
    SIGNATURE,
};
use crate::credential::{parse_private_key_pem, ServiceAccount};

/// UrlSigner builds signed URLs for Google Cloud Storage.
///
/// The signer holds no per-call state, a single instance can be shared
/// across threads and reused for any number of URLs.
///
/// ## Reference
///
/// - [Signed URLs (V2 signing process)](https://cloud.google.com/storage/docs/access-control/signed-urls-v2)
#[derive(Clone)]
pub struct UrlSigner {
    signing_key: SigningKey<Sha256>,
    client_email: String,
    base_url: String,
    default_expiration: Duration,

    time: Option<DateTime>,
}

impl Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("default_expiration", &self.default_expiration)
            .finish()
    }
}

impl UrlSigner {
    /// Create a signer from an already loaded private key and the identity
    /// (usually the service account email) it belongs to.
    pub fn new(private_key: RsaPrivateKey, client_email: impl Into<String>) -> Self {
        Self {
            signing_key: SigningKey::<Sha256>::new(private_key),
            client_email: client_email.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_expiration: DEFAULT_EXPIRATION,
            time: None,
        }
    }

    /// Create a signer from a service account credential.
    pub fn from_service_account(sa: &ServiceAccount) -> Result<Self> {
        Ok(Self::new(sa.rsa_private_key()?, sa.client_email.clone()))
    }

    /// Create a signer from config.
    ///
    /// Key material is resolved in order: `private_key`, `credential_content`,
    /// `credential_path`. `client_email` in config overrides the one in the
    /// credential file. A zero `default_expiration` is rejected.
    pub fn from_config(config: Config) -> Result<Self> {
        if config.default_expiration.is_zero() {
            return Err(Error::config_invalid("default expiration must not be zero"));
        }

        let sa = if let Some(content) = &config.credential_content {
            Some(ServiceAccount::from_slice(content.as_bytes())?)
        } else if let Some(path) = &config.credential_path {
            Some(ServiceAccount::from_path(path)?)
        } else {
            None
        };

        let private_key = match (&config.private_key, &sa) {
            (Some(pem), _) => parse_private_key_pem(pem)?,
            (None, Some(sa)) => sa.rsa_private_key()?,
            (None, None) => {
                return Err(Error::config_invalid(
                    "private key or service account credential is required",
                ))
            }
        };

        let client_email = config
            .client_email
            .or_else(|| sa.map(|sa| sa.client_email))
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("client email is required"))?;
        debug!("signer: client_email: {client_email}");

        Ok(Self::new(private_key, client_email)
            .with_base_url(config.base_url)
            .with_default_expiration(config.default_expiration))
    }

    /// Set the base url used when a request doesn't carry its own.
    ///
    /// Default to [`DEFAULT_BASE_URL`].
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the validity window used by the convenience methods.
    ///
    /// Default to [`DEFAULT_EXPIRATION`]. A zero duration would produce
    /// already expired urls, so it resets to [`DEFAULT_EXPIRATION`].
    pub fn with_default_expiration(mut self, expiration: Duration) -> Self {
        self.default_expiration = if expiration.is_zero() {
            DEFAULT_EXPIRATION
        } else {
            expiration
        };
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The identity embedded in signed URLs.
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// The default base url.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The validity window used by the convenience methods.
    pub fn default_expiration(&self) -> Duration {
        self.default_expiration
    }

    /// Sign the canonical string of `req`, returning the base64 signature.
    pub fn sign(&self, req: &SignableRequest) -> Result<String> {
        self.sign_string(&req.canonical_string())
    }

    /// Sign an already canonicalized string with RSA PKCS#1 v1.5 over SHA-256,
    /// returning the signature as standard base64.
    pub fn sign_string(&self, string_to_sign: &str) -> Result<String> {
        let mut rng = thread_rng();
        let signature = self
            .signing_key
            .try_sign_with_rng(&mut rng, string_to_sign.as_bytes())
            .map_err(|e| Error::signing_failed("failed to sign string").with_source(e))?;

        Ok(base64_encode(&signature.to_bytes()))
    }

    /// Build a signed url for `req`.
    ///
    /// # Note
    ///
    /// If `expires_in` is a non-zero duration, `req.expiration` is
    /// **overwritten** with `now + expires_in` (whole seconds) before
    /// signing. Pass `None` or a zero duration to keep the expiration set
    /// on the request, or use [`UrlSigner::signed_url`] which never
    /// modifies its input.
    pub fn make_url(
        &self,
        req: &mut SignableRequest,
        expires_in: Option<Duration>,
    ) -> Result<String> {
        if let Some(expires_in) = expires_in.filter(|d| !d.is_zero()) {
            req.expiration = time::add_seconds(self.now(), expires_in);
        }

        self.signed_url(req)
    }

    /// Build a signed url for `req` using its expiration as-is.
    pub fn signed_url(&self, req: &SignableRequest) -> Result<String> {
        let signature = self.sign(req)?;
        let expires = req.expiration.timestamp().to_string();
        let object_path = req.object_path();
        debug!("signed url for {object_path} expires at {expires}");

        let query = [
            (GOOGLE_ACCESS_ID, self.client_email.as_str()),
            (EXPIRES, expires.as_str()),
            (SIGNATURE, signature.as_str()),
        ]
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &GOOG_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &GOOG_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

        let base_url = req.base_url.as_deref().unwrap_or(&self.base_url);
        Ok(format!("{base_url}{object_path}?{query}"))
    }

    /// Build a signed url for `method` on `bucket`/`object` with extra headers.
    ///
    /// Without `expires_in` (or with a zero one), the signer's default
    /// expiration is used.
    pub fn make_method_url(
        &self,
        method: Method,
        bucket: &str,
        object: &str,
        expires_in: Option<Duration>,
        headers: &[(String, String)],
    ) -> Result<String> {
        let mut req = SignableRequest::new(method, bucket, object).with_headers(headers.to_vec());
        self.make_url(
            &mut req,
            Some(
                expires_in
                    .filter(|d| !d.is_zero())
                    .unwrap_or(self.default_expiration),
            ),
        )
    }

    /// Signed url for downloading an object.
    pub fn download_url(&self, bucket: &str, object: &str) -> Result<String> {
        self.make_method_url(Method::GET, bucket, object, None, &[])
    }

    /// Signed url for uploading an object.
    pub fn upload_url(&self, bucket: &str, object: &str) -> Result<String> {
        self.make_method_url(Method::PUT, bucket, object, None, &[])
    }

    /// Signed url for deleting an object.
    pub fn delete_url(&self, bucket: &str, object: &str) -> Result<String> {
        self.make_method_url(Method::DELETE, bucket, object, None, &[])
    }

    fn now(&self) -> DateTime {
        self.time.unwrap_or_else(time::now)
    }
}
