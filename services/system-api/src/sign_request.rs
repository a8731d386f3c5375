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

use crate::args::{ArgValue, Args};
use crate::canonical::{canonical_pairs, encode, join_pairs};
use crate::constants::*;
use crate::signer::{sign, Fixed};
use crate::{Credential, Format};
use botr_core::time::DateTime;
use botr_core::utils::Redact;
use botr_core::{Error, Result};
use log::debug;
use std::collections::BTreeMap;

/// RequestSigner merges caller arguments with the `api_*` fields and signs them.
///
/// ## Reserved fields
///
/// `api_key`, `api_nonce`, `api_timestamp`, `api_kit` and `api_signature`
/// always carry the client's values: caller values under these names are
/// dropped before merging. `api_format` may be supplied by the caller to pick
/// the response format of one call; it must name a known [`Format`].
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    format: Format,
    fixed: Fixed,
}

impl RequestSigner {
    /// Create a new signer for this credential and default format.
    pub fn new(credential: Credential, format: Format) -> Self {
        Self {
            credential,
            format,
            fixed: Fixed::default(),
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.fixed.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Reusing a nonce gets requests rejected as replays.
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: u32) -> Self {
        self.fixed.nonce = Some(nonce);
        self
    }

    /// Default response format of this signer.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Response format of a call with these arguments.
    pub fn resolve_format(&self, args: &Args) -> Result<Format> {
        match args.get(API_FORMAT) {
            None => Ok(self.format),
            Some(v) => v
                .as_scalar()
                .ok_or_else(|| Error::config_invalid("api_format must be a single value"))?
                .parse(),
        }
    }

    /// Merge `args` with the reserved fields and sign the result.
    ///
    /// A fresh nonce and timestamp are generated on every call.
    pub fn sign(&self, args: &Args) -> Result<SignedRequest> {
        let format = self.resolve_format(args)?;

        let mut fields = BTreeMap::new();
        for (k, v) in args.iter() {
            if RESERVED_FIELDS.contains(&k) {
                if k != API_FORMAT {
                    debug!("dropping caller supplied reserved field {k}");
                }
                continue;
            }
            fields.insert(k.to_string(), v.clone());
        }

        let nonce = self.fixed.nonce();
        let timestamp = self.fixed.timestamp();
        fields.insert(API_NONCE.to_string(), ArgValue::from(nonce.as_str()));
        fields.insert(API_TIMESTAMP.to_string(), ArgValue::from(timestamp));
        fields.insert(API_KEY.to_string(), ArgValue::from(&self.credential.api_key));
        fields.insert(API_FORMAT.to_string(), ArgValue::from(format.as_str()));
        fields.insert(API_KIT.to_string(), ArgValue::from(KIT));

        let pairs = canonical_pairs(fields.iter().map(|(k, v)| (k.as_str(), v)));
        let base_string = join_pairs(&pairs);
        debug!("signature base string: {}", redact_key(&base_string));
        let signature = sign(&base_string, &self.credential.api_secret);

        Ok(SignedRequest {
            fields,
            base_string,
            signature,
            format,
            nonce,
            timestamp,
        })
    }
}

/// A merged and signed field set.
///
/// Nothing that contributed to the signature can be changed once built.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    fields: BTreeMap<String, ArgValue>,
    base_string: String,
    signature: String,
    format: Format,
    nonce: String,
    timestamp: i64,
}

impl SignedRequest {
    /// The canonical base string that was signed.
    pub fn base_string(&self) -> &str {
        &self.base_string
    }

    /// Base string with the `api_key` value redacted, for logs.
    pub(crate) fn redacted_base_string(&self) -> String {
        redact_key(&self.base_string)
    }

    /// Lowercase hex signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Response format requested by this call.
    pub fn format(&self) -> Format {
        self.format
    }

    /// 8 digit nonce.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Unix seconds at signing time.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Get a signed field, `api_signature` included.
    pub fn field(&self, key: &str) -> Option<&str> {
        if key == API_SIGNATURE {
            return Some(&self.signature);
        }
        self.fields.get(key).and_then(|v| v.as_scalar())
    }

    /// Query string carrying every field plus `api_signature`.
    pub fn query(&self) -> String {
        let mut q = self.base_string.clone();
        if !q.is_empty() {
            q.push('&');
        }
        q.push_str(&join_pairs(&[(
            encode(API_SIGNATURE),
            encode(&self.signature),
        )]));
        q
    }

    /// Full GET target for `call` under `api_root`.
    pub fn url(&self, api_root: &str, call: &str) -> String {
        let api_root = api_root.trim_end_matches('/');
        if call.starts_with('/') {
            format!("{api_root}{call}?{}", self.query())
        } else {
            format!("{api_root}/{call}?{}", self.query())
        }
    }

    /// Unencoded fields for a form body, `api_signature` last.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut out = self
            .fields
            .iter()
            .flat_map(|(k, v)| v.values().into_iter().map(move |v| (k.clone(), v.to_string())))
            .collect::<Vec<_>>();
        out.push((API_SIGNATURE.to_string(), self.signature.clone()));
        out
    }
}

fn redact_key(base_string: &str) -> String {
    base_string
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((API_KEY, v)) => format!("{API_KEY}={:?}", Redact::from(v)),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}
