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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Fields injected into every signed call.
pub const API_KEY: &str = "api_key";
pub const API_NONCE: &str = "api_nonce";
pub const API_TIMESTAMP: &str = "api_timestamp";
pub const API_KIT: &str = "api_kit";
pub const API_FORMAT: &str = "api_format";
pub const API_SIGNATURE: &str = "api_signature";

/// Field names owned by the client. Caller values under these names are
/// removed before merging; `api_format` is read first as a format override.
pub const RESERVED_FIELDS: [&str; 6] = [
    API_KEY,
    API_NONCE,
    API_TIMESTAMP,
    API_KIT,
    API_FORMAT,
    API_SIGNATURE,
];

/// Version of the system API this client speaks.
pub const API_VERSION: &str = "1.4";
/// Kit identifier sent as `api_kit`.
pub const KIT: &str = concat!("rust-", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_ENDPOINT: &str = "https://api.bitsontherun.com";
pub const DEFAULT_API_VERSION_PATH: &str = "v1";

// Env values used to configure the client.
pub const BOTR_API_KEY: &str = "BOTR_API_KEY";
pub const BOTR_API_SECRET: &str = "BOTR_API_SECRET";
pub const BOTR_API_ENDPOINT: &str = "BOTR_API_ENDPOINT";
pub const BOTR_API_VERSION: &str = "BOTR_API_VERSION";
pub const BOTR_API_FORMAT: &str = "BOTR_API_FORMAT";

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FILE_FIELD: &str = "file";

/// AsciiSet for RFC 3986 percent-encoding.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space becomes `%20`, never `+`.
pub static BOTR_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
