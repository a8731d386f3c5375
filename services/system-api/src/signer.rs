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

//! Signature, nonce and timestamp of one call.

use botr_core::hash::hex_sha1_concat;
use botr_core::time::{now, unix_seconds, DateTime};
use rand::Rng;

/// Largest nonce value; nonces are formatted to exactly 8 digits.
pub const MAX_NONCE: u32 = 99_999_999;

/// Compute the signature of a canonical base string.
///
/// The signature is the lowercase hex SHA-1 of the base string with the
/// secret appended. The server verifies exactly this construction, so it
/// must not be swapped for an HMAC.
///
/// ```
/// use botr_system_api::signer::sign;
///
/// assert_eq!(sign("a=1&b=2", "secret"), "69021e767b8b2f38af0bcc5fcefee075eb2ec60d");
/// ```
pub fn sign(base_string: &str, secret: &str) -> String {
    hex_sha1_concat(&[base_string.as_bytes(), secret.as_bytes()])
}

/// Format a nonce value as 8 zero-padded digits.
pub fn format_nonce(value: u32) -> String {
    format!("{:08}", value.min(MAX_NONCE))
}

/// Draw a fresh nonce, uniformly from `[0, 99999999]`.
pub fn nonce() -> String {
    format_nonce(rand::thread_rng().gen_range(0..=MAX_NONCE))
}

/// Current time in unix seconds.
pub fn timestamp() -> i64 {
    unix_seconds(now())
}

/// Fixed inputs for signing, used to make signatures reproducible.
///
/// Production code leaves both unset so every call draws its own nonce and
/// reads the clock at signing time.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Fixed {
    pub time: Option<DateTime>,
    pub nonce: Option<u32>,
}

impl Fixed {
    pub fn nonce(&self) -> String {
        self.nonce.map(format_nonce).unwrap_or_else(nonce)
    }

    pub fn timestamp(&self) -> i64 {
        self.time.map(unix_seconds).unwrap_or_else(timestamp)
    }
}
