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

use botr_core::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Response format requested through `api_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// PHP `serialize()` output, the server's native format.
    #[default]
    Php,
    /// JSON.
    Json,
    /// XML.
    Xml,
}

impl Format {
    /// Value sent as `api_format`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Php => "php",
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "php" => Ok(Format::Php),
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            v => Err(Error::config_invalid(format!(
                "unsupported response format {v:?}, expected one of php, json, xml"
            ))),
        }
    }
}
