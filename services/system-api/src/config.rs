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

use crate::constants::*;
use crate::{Credential, Format};
use botr_core::utils::Redact;
use botr_core::{Context, Error, Result};
use std::fmt::{Debug, Formatter};

/// Config for the system API client.
#[derive(Clone)]
pub struct Config {
    /// API key, sent with every call.
    pub api_key: Option<String>,
    /// API secret, used only to sign.
    pub api_secret: Option<String>,
    /// API root, for example `https://api.bitsontherun.com`.
    pub endpoint: String,
    /// Version path segment appended to the endpoint, for example `v1`.
    pub api_version: String,
    /// Response format used when a call doesn't ask for one.
    pub format: Format,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION_PATH.to_string(),
            format: Format::default(),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("api_secret", &self.api_secret.as_ref().map(Redact::from))
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("format", &self.format)
            .finish()
    }
}

impl Config {
    /// Create a config with the given key pair and default settings.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            ..Default::default()
        }
    }

    /// Load config from environment variables.
    ///
    /// Unset variables keep their defaults; an unknown `BOTR_API_FORMAT`
    /// is an error.
    pub fn from_env(ctx: &Context) -> Result<Self> {
        let mut cfg = Self {
            api_key: ctx.env_var(BOTR_API_KEY),
            api_secret: ctx.env_var(BOTR_API_SECRET),
            ..Default::default()
        };
        if let Some(v) = ctx.env_var(BOTR_API_ENDPOINT) {
            cfg.endpoint = v;
        }
        if let Some(v) = ctx.env_var(BOTR_API_VERSION) {
            cfg.api_version = v;
        }
        if let Some(v) = ctx.env_var(BOTR_API_FORMAT) {
            cfg.format = v.parse()?;
        }

        Ok(cfg)
    }

    /// Override the API root, for example to point at a test server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the version path segment.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the default response format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub(crate) fn credential(&self) -> Result<Credential> {
        let cred = Credential::new(
            self.api_key.clone().unwrap_or_default(),
            self.api_secret.clone().unwrap_or_default(),
        );
        if let Some(field) = cred.missing_field() {
            return Err(Error::config_invalid(format!("{field} is required")));
        }

        Ok(cred)
    }

    /// Endpoint joined with the version segment, without trailing slash.
    pub(crate) fn api_root(&self) -> Result<String> {
        let endpoint = self.endpoint.trim().trim_end_matches('/');
        let uri = endpoint
            .parse::<http::Uri>()
            .map_err(|e| Error::config_invalid(format!("invalid endpoint {endpoint:?}")).with_source(e))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::config_invalid(format!(
                "endpoint {endpoint:?} must be an absolute http(s) url"
            )));
        }

        let version = self.api_version.trim().trim_matches('/');
        if version.is_empty() {
            Ok(endpoint.to_string())
        } else {
            Ok(format!("{endpoint}/{version}"))
        }
    }
}
