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

//! Two phase upload.
//!
//! Phase 1 is an ordinary signed call whose payload carries a `link`: a one
//! time capability to upload a single file. Phase 2 posts the file as the
//! multipart field `file` to the URL described by that link.

use crate::canonical::encode;
use crate::constants::UPLOAD_FILE_FIELD;
use crate::decode::{decode, Response};
use crate::Format;
use botr_core::utils::Redact;
use botr_core::{Capabilities, Context, Error, FilePart, MultipartRequest, Result};
use bytes::Bytes;
use log::debug;
use serde::Deserialize;
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;

/// Progress of an upload.
///
/// `Requested -> LinkIssued -> Uploaded`, or `Failed` from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    /// Phase 1 call is in flight.
    Requested,
    /// The server issued an upload link.
    LinkIssued,
    /// Phase 2 returned a payload.
    Uploaded,
    /// The upload did not complete.
    Failed,
}

impl Display for UploadStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UploadStage::Requested => "requested",
            UploadStage::LinkIssued => "link issued",
            UploadStage::Uploaded => "uploaded",
            UploadStage::Failed => "failed",
        })
    }
}

/// Server issued, single use upload target.
///
/// An `UploadLink` is consumed by the upload that uses it and can't be
/// cloned or serialized back out.
#[derive(Deserialize)]
pub struct UploadLink {
    /// Scheme, usually `http`.
    pub protocol: String,
    /// Host, optionally with port.
    pub address: String,
    /// Path, starting with `/`.
    pub path: String,
    /// Credentials of this upload.
    pub query: UploadQuery,
}

/// `query` member of an [`UploadLink`].
#[derive(Deserialize)]
pub struct UploadQuery {
    /// Upload key.
    #[serde(deserialize_with = "string_or_number")]
    pub key: String,
    /// Upload token.
    #[serde(deserialize_with = "string_or_number")]
    pub token: String,
}

impl Debug for UploadLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadLink")
            .field("protocol", &self.protocol)
            .field("address", &self.address)
            .field("path", &self.path)
            .field("query", &self.query)
            .finish()
    }
}

impl Debug for UploadQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadQuery")
            .field("key", &self.key)
            .field("token", &Redact::from(&self.token))
            .finish()
    }
}

fn string_or_number<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(d)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        v => Err(serde::de::Error::custom(format!(
            "expected string or number, found {v}"
        ))),
    }
}

impl UploadLink {
    /// Take the `link` member out of a phase 1 response.
    pub fn from_response(resp: &Response) -> Result<Self> {
        let Some(payload) = resp.as_decoded() else {
            return Err(Error::upload(
                "upload link request returned an undecodable payload",
            ));
        };
        if resp.is_error() {
            let message = payload
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("no message");
            return Err(Error::upload(format!(
                "upload link request rejected: {message}"
            )));
        }
        let link = payload
            .get("link")
            .ok_or_else(|| Error::upload("upload link request returned no link"))?;

        UploadLink::deserialize(link)
            .map_err(|e| Error::upload("upload link is malformed").with_source(e))
    }

    /// Build the phase 2 target:
    /// `protocol://address/path?key=<key>&token=<token>&api_format=<format>`.
    pub fn upload_url(&self, format: Format) -> String {
        let path = if self.path.starts_with('/') || self.path.is_empty() {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        format!(
            "{}://{}{}?key={}&token={}&api_format={}",
            self.protocol,
            self.address,
            path,
            encode(&self.query.key),
            encode(&self.query.token),
            format
        )
    }
}

/// Uploader runs phase 2 against the transport chosen at construction.
#[derive(Debug, Clone)]
pub struct Uploader {
    ctx: Context,
    capabilities: Capabilities,
}

impl Uploader {
    /// Create an uploader over `ctx`, probing its transport once.
    pub fn new(ctx: Context) -> Self {
        let capabilities = ctx.capabilities();
        Self { ctx, capabilities }
    }

    /// Post `file_path` to the target described by `link`.
    ///
    /// Fails before any I/O when the transport cannot send multipart bodies.
    /// A transport failure is reported as an upload error carrying the
    /// backend's kind and message; there is no payload to decode then.
    pub async fn upload(&self, link: UploadLink, file_path: &str, format: Format) -> Result<Response> {
        if !self.capabilities.multipart {
            return Err(Error::upload(
                "no transport backend supports multipart upload, configure one such as ReqwestHttpSend",
            ));
        }

        let url = link.upload_url(format);
        debug!("upload stage {}: posting {file_path} to {link:?}", UploadStage::LinkIssued);
        let uri = url
            .parse::<http::Uri>()
            .map_err(|e| Error::upload(format!("upload link is not a valid url: {e}")).with_source(e))?;

        let content = self.ctx.file_read(file_path).await?;
        let file_name = Path::new(file_path)
            .file_name()
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_else(|| UPLOAD_FILE_FIELD.to_string());

        let req = MultipartRequest {
            uri,
            parts: vec![FilePart {
                name: UPLOAD_FILE_FIELD.to_string(),
                file_name,
                content: Bytes::from(content),
            }],
        };

        let resp = match self.ctx.http_send_multipart(req).await {
            Ok(resp) => resp,
            Err(err) => {
                debug!("upload stage {}: {err}", UploadStage::Failed);
                let message = format!("{}: {}", err.kind(), err.message());
                return Err(Error::upload(message).with_source(err));
            }
        };

        debug!(
            "upload stage {}: status {}",
            UploadStage::Uploaded,
            resp.status()
        );
        Ok(decode(format, resp.into_body()))
    }
}
