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

//! Bits on the Run system API client.
//!
//! Every call is authenticated by a per-request signature: the call's
//! arguments are merged with `api_key`, `api_nonce`, `api_timestamp`,
//! `api_kit` and `api_format`, sorted and percent-encoded into a base
//! string, and signed as `sha1(base_string + api_secret)`.
//!
//! ## Example
//!
//! ```no_run
//! use botr_core::Context;
//! use botr_system_api::{Args, Client, Config};
//!
//! # async fn example(ctx: Context) -> botr_core::Result<()> {
//! let client = Client::new(ctx, Config::new("XOqEAfxj", "uA96CFtJa138E2T5GhKfngml"))?;
//!
//! // List videos.
//! let videos = client.call("/videos/list", &Args::new()).await?;
//! println!("{:?}", videos.as_decoded());
//!
//! // Replace a thumbnail.
//! let resp = client
//!     .upload_file(
//!         "/videos/thumbnails/update",
//!         &Args::new().with("video_key", "yYul4DRz"),
//!         "./thumbnail.jpg",
//!     )
//!     .await?;
//! println!("{:?}", resp.status());
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{API_VERSION, KIT, RESERVED_FIELDS};

mod args;
pub use args::{ArgValue, Args};

pub mod canonical;
pub mod signer;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod format;
pub use format::Format;

mod sign_request;
pub use sign_request::{RequestSigner, SignedRequest};

mod decode;
pub use decode::{decode, Response};

mod upload;
pub use upload::{UploadLink, UploadQuery, UploadStage, Uploader};

mod client;
pub use client::Client;
