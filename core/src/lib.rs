//! Core components for building signed URLs.
//!
//! This crate provides the foundational types shared by the urlsign services.
//!
//! ## Overview
//!
//! - [`Error`] and [`ErrorKind`]: the error type returned by every fallible operation
//! - [`hash`]: Base64 and SHA-256 helpers
//! - [`time`]: Time helpers built on `chrono`
//!
//! ## Example
//!
//! ```
//! use urlsign_core::hash::{base64_encode, sha256};
//! use urlsign_core::time::from_timestamp;
//!
//! let digest = sha256(b"GET\n\n\n1700000000\n/my-bucket/file.txt");
//! assert_eq!(base64_encode(&digest).len(), 44);
//!
//! let expires = from_timestamp(1_700_000_000).unwrap();
//! assert_eq!(expires.timestamp(), 1_700_000_000);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;

mod error;
pub use error::{Error, ErrorKind, Result};
