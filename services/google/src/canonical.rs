use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use http::Method;
use log::debug;
use urlsign_core::time::{self, DateTime};

use crate::constants::{X_GOOG_ENCRYPTION_KEY, X_GOOG_ENCRYPTION_KEY_SHA256};

/// SignableRequest describes everything that goes into a signed URL.
///
/// The string to sign is a pure function of these fields, see
/// [`SignableRequest::canonical_string`].
///
/// ```
/// use urlsign_core::time::from_timestamp;
/// use urlsign_google::SignableRequest;
///
/// let req = SignableRequest::new(http::Method::GET, "my-bucket", "file.txt")
///     .with_expiration(from_timestamp(1_700_000_000).unwrap());
///
/// assert_eq!(
///     req.canonical_string(),
///     "GET\n\n\n1700000000\n/my-bucket/file.txt"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignableRequest {
    /// HTTP method of the request the URL grants.
    pub method: Method,
    /// Content MD5 of the payload, empty if not relevant.
    pub content_hash: String,
    /// Content type of the payload, empty if not relevant.
    pub content_type: String,
    /// Point in time after which the signature is rejected.
    pub expiration: DateTime,
    /// Extra headers in caller insertion order.
    pub headers: Vec<(String, String)>,
    /// Bucket name.
    pub bucket: String,
    /// Object path inside the bucket.
    pub object: String,
    /// Base URL override for this request.
    ///
    /// Falls back to the signer's base url if not set.
    pub base_url: Option<String>,
}

impl SignableRequest {
    /// Create a new request for `method` against `bucket`/`object`.
    ///
    /// Expiration defaults to the unix epoch; set it explicitly or let
    /// the signer compute it.
    pub fn new(method: Method, bucket: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            method,
            content_hash: String::new(),
            content_type: String::new(),
            expiration: DateTime::default(),
            headers: Vec::new(),
            bucket: bucket.into(),
            object: object.into(),
            base_url: None,
        }
    }

    /// Set the content md5 hash.
    pub fn with_content_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = hash.into();
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set an absolute expiration.
    pub fn with_expiration(mut self, expiration: DateTime) -> Self {
        self.expiration = expiration;
        self
    }

    /// Return a request that expires `duration` from now.
    ///
    /// This is the non-mutating way to refresh the expiration; pass the
    /// result to [`UrlSigner::signed_url`](crate::UrlSigner::signed_url).
    pub fn with_expires_in(self, duration: Duration) -> Self {
        self.with_expiration(time::add_seconds(time::now(), duration))
    }

    /// Append an extra header.
    ///
    /// If two headers normalize to the same name, the one added last wins.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append extra headers from an iterator, keeping its order.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the base url for this request only.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Canonical header block, see [`canonical_headers`].
    pub fn canonical_headers(&self) -> String {
        canonical_headers(&self.headers)
    }

    /// Canonical resource path, see [`object_path`].
    pub fn object_path(&self) -> String {
        object_path(&self.bucket, &self.object)
    }

    /// Build the exact string that gets signed.
    ///
    /// ```text
    /// METHOD
    /// CONTENT-HASH
    /// CONTENT-TYPE
    /// EXPIRATION-UNIX-SECONDS
    /// [canonical-headers-block]
    /// RESOURCE-PATH
    /// ```
    ///
    /// Empty fields keep their (empty) line. The header block carries its
    /// own trailing newline, and the path line has none.
    pub fn canonical_string(&self) -> String {
        // 256 is specially chosen to avoid reallocation for most requests.
        let mut f = String::with_capacity(256);

        f.push_str(self.method.as_str());
        f.push('\n');
        f.push_str(&self.content_hash);
        f.push('\n');
        f.push_str(&self.content_type);
        f.push('\n');
        f.push_str(&self.expiration.timestamp().to_string());
        f.push('\n');
        f.push_str(&self.canonical_headers());
        f.push_str(&self.object_path());

        debug!("canonical string to sign: {f:?}");
        f
    }
}

impl fmt::Display for SignableRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

/// Render extra headers into the canonical header block.
///
/// - Names are trimmed and lower-cased, values are trimmed.
/// - `x-goog-encryption-key` and `x-goog-encryption-key-sha256` are dropped.
/// - Duplicated names after normalization keep the last value in input order.
/// - Names are sorted byte-wise.
///
/// Every line is `name:value\n`. No headers render as the empty string.
pub fn canonical_headers(headers: &[(String, String)]) -> String {
    let mut normalized = BTreeMap::new();
    for (name, value) in headers {
        let name = name.trim().to_lowercase();
        if name == X_GOOG_ENCRYPTION_KEY || name == X_GOOG_ENCRYPTION_KEY_SHA256 {
            continue;
        }
        normalized.insert(name, value.trim());
    }

    let mut f = String::new();
    for (name, value) in normalized {
        f.push_str(&name);
        f.push(':');
        f.push_str(value);
        f.push('\n');
    }
    f
}

/// Build the canonical resource path: `/<bucket>/<object>`.
///
/// Slashes around the bucket and a leading slash on the object are
/// stripped so that exactly one separator remains. Nothing is escaped.
pub fn object_path(bucket: &str, object: &str) -> String {
    let bucket = bucket.trim_matches('/');
    let object = object.strip_prefix('/').unwrap_or(object);

    let mut f = String::with_capacity(bucket.len() + object.len() + 2);
    f.push('/');
    f.push_str(bucket);
    f.push('/');
    f.push_str(object);
    f
}
