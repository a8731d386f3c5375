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

use botr_core::{Context, OsEnv, Result};
use botr_file_read_tokio::TokioFileRead;
use botr_http_send_reqwest::ReqwestHttpSend;
use botr_system_api::{Client, Config};

/// Create a context backed by reqwest, tokio file reads and the process
/// environment.
///
/// With the `upload` feature the reqwest backend sends both GET calls and
/// multipart uploads. Without it this is [`minimal_context`].
pub fn default_context() -> Context {
    if cfg!(feature = "upload") {
        context_with(ReqwestHttpSend::default())
    } else {
        minimal_context()
    }
}

/// Create a context whose transport only sends GET calls.
///
/// Calls work as usual; uploads fail with [`ErrorKind::Upload`](botr_core::ErrorKind::Upload)
/// before the file is read.
pub fn minimal_context() -> Context {
    context_with(ReqwestHttpSend::default().without_multipart())
}

fn context_with(http: ReqwestHttpSend) -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(http)
        .with_env(OsEnv)
}

/// Create a client over [`default_context`].
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> botr::Result<()> {
/// use botr::{default_client, Args, Config};
///
/// let client = default_client(Config::new("key", "secret"))?;
/// let resp = client.call("/videos/show", &Args::new().with("video_key", "yYul4DRz")).await?;
/// assert!(!resp.is_error());
/// # Ok(())
/// # }
/// ```
pub fn default_client(config: Config) -> Result<Client> {
    Client::new(default_context(), config)
}
