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

//! Reqwest-based transport for botr.
//!
//! `ReqwestHttpSend` executes the signed GET calls and, with the `multipart`
//! feature (on by default), the multipart POST used by uploads. Built
//! without that feature, or switched with
//! [`ReqwestHttpSend::without_multipart`], it is the minimal GET-only
//! backend: calls work and uploads are refused before any I/O.
//!
//! ## Example
//!
//! ```no_run
//! use botr_core::Context;
//! use botr_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! # fn example() -> botr_core::Result<()> {
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::with_timeout(Duration::from_secs(30))?);
//! assert!(ctx.capabilities().get);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use botr_core::{Capabilities, Error, HttpSend, Result};
#[cfg(feature = "multipart")]
use botr_core::MultipartRequest;
use bytes::Bytes;
use log::debug;
#[cfg(feature = "multipart")]
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Request};
use std::time::Duration;

/// HttpSend backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
    multipart: bool,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        Self::new(Client::default())
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            multipart: cfg!(feature = "multipart"),
        }
    }

    /// Create a new ReqwestHttpSend whose requests give up after `timeout`.
    ///
    /// Without a timeout a request blocks until the server answers or the
    /// connection drops.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            Error::config_invalid("failed to build http client with timeout").with_source(e)
        })?;
        Ok(Self::new(client))
    }

    /// Only send GET calls; uploads are refused.
    pub fn without_multipart(mut self) -> Self {
        self.multipart = false;
        self
    }

    async fn execute(&self, req: Request) -> Result<http::Response<Bytes>> {
        let resp = self.client.execute(req).await.map_err(transport_error)?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(transport_error)?;
        debug!("received {} bytes with status {}", body.len(), status);

        let mut http_resp = http::Response::new(body);
        *http_resp.status_mut() = status;
        *http_resp.headers_mut() = headers;
        Ok(http_resp)
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    let message = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "failed to connect"
    } else if err.is_body() || err.is_decode() {
        "failed to read response body"
    } else {
        "failed to send request"
    };

    Error::transport(format!("{message}: {err}")).with_source(err)
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    fn capabilities(&self) -> Capabilities {
        if self.multipart {
            Capabilities::FULL
        } else {
            Capabilities::GET_ONLY
        }
    }

    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        self.execute(req).await
    }

    #[cfg(feature = "multipart")]
    async fn http_send_multipart(&self, req: MultipartRequest) -> Result<http::Response<Bytes>> {
        if !self.multipart {
            return Err(Error::upload("multipart upload is disabled on this transport"));
        }

        let mut form = Form::new();
        for part in req.parts {
            form = form.part(
                part.name,
                Part::bytes(part.content.to_vec()).file_name(part.file_name),
            );
        }

        let req = self
            .client
            .post(req.uri.to_string())
            .multipart(form)
            .build()
            .map_err(|e| Error::request_invalid("failed to build multipart request").with_source(e))?;
        self.execute(req).await
    }
}
