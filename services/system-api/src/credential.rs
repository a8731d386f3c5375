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

use crate::constants::API_KEY;
use botr_core::utils::Redact;
use std::fmt::{Debug, Formatter};

/// Credential that holds the API key pair.
///
/// The key travels with every call as `api_key`; the secret never leaves the
/// process and is only appended to the base string before hashing.
#[derive(Default, Clone)]
pub struct Credential {
    /// Public API key.
    pub api_key: String,
    /// Shared API secret.
    pub api_secret: String,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &Redact::from(&self.api_key))
            .field("api_secret", &Redact::from(&self.api_secret))
            .finish()
    }
}

impl Credential {
    /// Create a credential from a key pair.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Name of the first blank half of the pair.
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        if self.api_key.trim().is_empty() {
            Some(API_KEY)
        } else if self.api_secret.trim().is_empty() {
            Some("api_secret")
        } else {
            None
        }
    }
}
