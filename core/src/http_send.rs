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

use crate::{Error, Result};
use bytes::Bytes;
use std::fmt::{Debug, Formatter};

/// Capabilities reported by a [`HttpSend`] backend.
///
/// The client reads them once at construction and never probes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// The backend can execute plain GET requests.
    pub get: bool,
    /// The backend can execute multipart POST requests with file attachments.
    pub multipart: bool,
}

impl Capabilities {
    /// No transport at all.
    pub const NONE: Capabilities = Capabilities {
        get: false,
        multipart: false,
    };

    /// A minimal backend that only fetches URLs.
    pub const GET_ONLY: Capabilities = Capabilities {
        get: true,
        multipart: false,
    };

    /// A full-featured backend.
    pub const FULL: Capabilities = Capabilities {
        get: true,
        multipart: true,
    };
}

/// One file attached to a multipart body.
#[derive(Clone)]
pub struct FilePart {
    /// Form field name, for example `file`.
    pub name: String,
    /// File name reported in the part's `Content-Disposition`.
    pub file_name: String,
    /// Raw file content.
    pub content: Bytes,
}

impl Debug for FilePart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("content", &format_args!("{} bytes", self.content.len()))
            .finish()
    }
}

/// A multipart POST with one or more file parts.
#[derive(Debug, Clone)]
pub struct MultipartRequest {
    /// Target of the POST, query string included.
    pub uri: http::Uri,
    /// File parts to attach.
    pub parts: Vec<FilePart>,
}

/// HttpSend executes exactly one outbound request.
///
/// Implementations return the body for every response they manage to read,
/// whatever its status code. Only failures where no response was obtained
/// (connect, DNS, TLS, timeout) become errors, with [`crate::ErrorKind::Transport`].
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Report what this backend is able to do.
    fn capabilities(&self) -> Capabilities;

    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;

    /// Send a multipart POST and return the response.
    ///
    /// Backends without [`Capabilities::multipart`] keep this default.
    async fn http_send_multipart(&self, req: MultipartRequest) -> Result<http::Response<Bytes>> {
        Err(Error::upload(format!(
            "multipart upload to {} not supported by {:?}",
            req.uri, self
        )))
    }
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}
