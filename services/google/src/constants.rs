// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::time::Duration;

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// The base Google Cloud Storage URL.
pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";

/// The default validity window for signed URLs.
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(60 * 60);

// Env values used in google services.
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const GOOGLE_STORAGE_BASE_URL: &str = "GOOGLE_STORAGE_BASE_URL";

// Query parameters of a signed URL, in the order they are emitted.
pub const GOOGLE_ACCESS_ID: &str = "GoogleAccessId";
pub const EXPIRES: &str = "Expires";
pub const SIGNATURE: &str = "Signature";

// Headers the storage service strips before verifying, so they must never be signed.
pub const X_GOOG_ENCRYPTION_KEY: &str = "x-goog-encryption-key";
pub const X_GOOG_ENCRYPTION_KEY_SHA256: &str = "x-goog-encryption-key-sha256";

/// AsciiSet for [Google UriEncode](https://cloud.google.com/storage/docs/authentication/canonical-requests)
///
/// Used in query: URI encode every byte except the unreserved characters:
/// 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static GOOG_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
