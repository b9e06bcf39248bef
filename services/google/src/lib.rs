//! Google Cloud Storage signed URLs
//!
//! Build time-limited URLs that grant bearer-style access to objects,
//! signed with a service account's RSA key.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use urlsign_core::Result;
//! use urlsign_google::{Config, SignableRequest, UrlSigner};
//!
//! fn main() -> Result<()> {
//!     // Load credential from `GOOGLE_APPLICATION_CREDENTIALS`.
//!     let signer = UrlSigner::from_config(Config::from_env())?;
//!
//!     // Shorthand with the default one hour validity.
//!     let url = signer.download_url("testbucket", "CONTRIBUTING.md")?;
//!     println!("download: {url}");
//!
//!     // Full control over the signed fields.
//!     let mut req = SignableRequest::new(http::Method::PUT, "testbucket", "upload.txt")
//!         .with_content_type("text/plain")
//!         .with_header("x-goog-acl", "public-read");
//!     let url = signer.make_url(&mut req, Some(Duration::from_secs(600)))?;
//!     println!("upload: {url}");
//!     Ok(())
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{DEFAULT_BASE_URL, DEFAULT_EXPIRATION};

mod canonical;
pub use canonical::{canonical_headers, object_path, SignableRequest};

mod config;
pub use config::Config;

mod credential;
pub use credential::{parse_private_key_pem, ServiceAccount};

mod sign_request;
pub use sign_request::UrlSigner;
