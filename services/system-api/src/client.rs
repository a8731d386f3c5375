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

use crate::constants::API_VERSION;
use crate::decode::{decode, Response};
use crate::sign_request::{RequestSigner, SignedRequest};
use crate::upload::{UploadLink, UploadStage, Uploader};
use crate::{Args, Config, Format};
use botr_core::{Capabilities, Context, Error, Result};
use bytes::Bytes;
use log::debug;

/// Client of the system API.
///
/// The client holds only immutable state: the credential, the API root and
/// the transport picked when it was built. It can be cloned and shared
/// across tasks; every call draws its own nonce and timestamp.
///
/// ```no_run
/// use botr_core::Context;
/// use botr_system_api::{Args, Client, Config};
///
/// # async fn example(ctx: Context) -> botr_core::Result<()> {
/// let client = Client::new(ctx, Config::new("XOqEAfxj", "uA96CFtJa138E2T5GhKfngml"))?;
/// let resp = client
///     .call("/videos/show", &Args::new().with("video_key", "yYul4DRz"))
///     .await?;
/// if resp.is_error() {
///     eprintln!("call failed: {:?}", resp.get("message"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    signer: RequestSigner,
    api_root: String,
    capabilities: Capabilities,
    uploader: Uploader,
}

impl Client {
    /// Create a client, validating `config` and probing the context's transport.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let credential = config.credential()?;
        let api_root = config.api_root()?;
        let capabilities = ctx.capabilities();
        debug!("client for {api_root} uses transport with {capabilities:?}");

        Ok(Self {
            signer: RequestSigner::new(credential, config.format),
            uploader: Uploader::new(ctx.clone()),
            ctx,
            api_root,
            capabilities,
        })
    }

    /// Replace the request signer, for example one with a fixed time.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Version of the system API this client speaks.
    pub fn version(&self) -> &'static str {
        API_VERSION
    }

    /// Capabilities of the transport picked at construction.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// API root, version segment included.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Merge and sign `args` without sending anything.
    pub fn sign(&self, args: &Args) -> Result<SignedRequest> {
        self.signer.sign(args)
    }

    /// Fully signed GET url of `call`.
    pub fn call_url(&self, call: &str, args: &Args) -> Result<String> {
        Ok(self.sign(args)?.url(&self.api_root, call))
    }

    /// Perform a signed call and decode its payload.
    ///
    /// The payload is decoded whatever the HTTP status; inspect
    /// [`Response::status`] for application level errors.
    pub async fn call(&self, call: &str, args: &Args) -> Result<Response> {
        if !self.capabilities.get {
            return Err(Error::transport(
                "no transport backend configured for calls",
            ));
        }

        let signed = self.sign(args)?;
        let url = signed.url(&self.api_root, call);
        debug!(
            "calling {}?{}&api_signature=*** as {}",
            url.split_once('?').map_or(url.as_str(), |(target, _)| target),
            signed.redacted_base_string(),
            signed.format()
        );

        let req = http::Request::get(url.as_str()).body(Bytes::new())?;
        let resp = self.ctx.http_send(req).await?;
        debug!("call {call} returned status {}", resp.status());

        Ok(decode(signed.format(), resp.into_body()))
    }

    /// Phase 1 of an upload: perform `call` and take the issued link.
    pub async fn request_upload_link(&self, call: &str, args: &Args) -> Result<UploadLink> {
        debug!("upload stage {}: {call}", UploadStage::Requested);
        let resp = self.call(call, args).await?;
        UploadLink::from_response(&resp)
    }

    /// Phase 2 of an upload: post `file_path` to `link`.
    ///
    /// The response format defaults to the client's default format.
    pub async fn upload(
        &self,
        link: UploadLink,
        file_path: &str,
        format: Option<Format>,
    ) -> Result<Response> {
        let format = format.unwrap_or(self.signer.format());
        self.uploader.upload(link, file_path, format).await
    }

    /// Both phases: request a link with `call`, then upload `file_path` to it.
    ///
    /// The upload is answered in the format the link request asked for.
    pub async fn upload_file(&self, call: &str, args: &Args, file_path: &str) -> Result<Response> {
        if !self.capabilities.multipart {
            return Err(Error::upload(
                "no transport backend supports multipart upload, configure one such as ReqwestHttpSend",
            ));
        }

        let format = self.signer.resolve_format(args)?;
        let link = self.request_upload_link(call, args).await?;
        self.uploader.upload(link, file_path, format).await
    }
}
