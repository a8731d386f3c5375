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

//! Decode response payloads in the format they were requested in.

mod php;
mod xml;

use crate::Format;
use bytes::Bytes;
use log::warn;
use serde_json::Value;

/// Deepest nesting a decoder accepts, same as `serde_json`'s recursion limit.
const MAX_DEPTH: usize = 128;

/// Outcome of one call or upload.
///
/// A payload that cannot be parsed in its requested format is kept untouched
/// as [`Response::Raw`]; this is not an error. Application level failures
/// arrive as a decoded payload whose `status` is `"error"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The payload parsed in the requested format.
    Decoded(Value),
    /// The payload as received.
    Raw(Bytes),
}

impl Response {
    /// Check if the payload was decoded.
    pub fn is_decoded(&self) -> bool {
        matches!(self, Response::Decoded(_))
    }

    /// Check if the payload was kept raw.
    pub fn is_raw(&self) -> bool {
        matches!(self, Response::Raw(_))
    }

    /// Decoded payload, if any.
    pub fn as_decoded(&self) -> Option<&Value> {
        match self {
            Response::Decoded(v) => Some(v),
            Response::Raw(_) => None,
        }
    }

    /// Raw payload, if decoding failed.
    pub fn as_raw(&self) -> Option<&Bytes> {
        match self {
            Response::Decoded(_) => None,
            Response::Raw(bs) => Some(bs),
        }
    }

    /// Consume into the decoded payload, if any.
    pub fn into_decoded(self) -> Option<Value> {
        match self {
            Response::Decoded(v) => Some(v),
            Response::Raw(_) => None,
        }
    }

    /// Member `key` of a decoded object payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_decoded()?.get(key)
    }

    /// Application level `status`, for example `"ok"` or `"error"`.
    pub fn status(&self) -> Option<&str> {
        self.get("status")?.as_str()
    }

    /// Check if the server reported an application level error.
    pub fn is_error(&self) -> bool {
        self.status() == Some("error")
    }
}

/// Decode `payload` as `format`, falling back to the raw bytes.
pub fn decode(format: Format, payload: Bytes) -> Response {
    let decoded = match format {
        Format::Php => php::unserialize(&payload),
        Format::Json => serde_json::from_slice(&payload).map_err(anyhow::Error::from),
        Format::Xml => xml::parse(&payload),
    };

    match decoded {
        Ok(v) => Response::Decoded(v),
        Err(err) => {
            warn!(
                "failed to decode {} bytes as {format}, keeping raw payload: {err}",
                payload.len()
            );
            Response::Raw(payload)
        }
    }
}
