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

//! Core components for calling the Bits on the Run system API.
//!
//! This crate provides the foundational types and traits shared by the botr
//! crates. It knows nothing about the signing protocol itself; it defines the
//! seams the protocol implementation plugs into.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Traits**: Abstract interfaces for the transport ([`HttpSend`]), local files ([`FileRead`]) and environment ([`Env`])
//! - **Error**: A single [`Error`] type with an [`ErrorKind`] callers can branch on
//!
//! ## Example
//!
//! ```no_run
//! use botr_core::{Capabilities, Context, HttpSend, Result};
//! use async_trait::async_trait;
//! use bytes::Bytes;
//!
//! #[derive(Debug)]
//! struct MyHttpSend;
//!
//! #[async_trait]
//! impl HttpSend for MyHttpSend {
//!     fn capabilities(&self) -> Capabilities {
//!         Capabilities::GET_ONLY
//!     }
//!
//!     async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         Ok(http::Response::new(Bytes::from_static(b"{}")))
//!     }
//! }
//!
//! let ctx = Context::new().with_http_send(MyHttpSend);
//! assert!(!ctx.capabilities().multipart);
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Hashing utilities
//! - [`time`]: Time utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod error;
pub use error::{Error, ErrorKind, Result};
mod fs;
pub use fs::{FileRead, NoopFileRead};
mod http_send;
pub use http_send::{Capabilities, FilePart, HttpSend, MultipartRequest, NoopHttpSend};
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};
