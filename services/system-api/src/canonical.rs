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

//! Canonical form of a call's fields.
//!
//! Keys are sorted by their raw bytes and every key and value is
//! percent-encoded with [`BOTR_QUERY_ENCODE_SET`]. An array-valued field
//! contributes one `key=value` pair per element, flattened depth-first and
//! kept in caller order. The sort is stable, so repeated pairs of one key
//! never move relative to each other.

use crate::args::ArgValue;
use crate::constants::{API_SIGNATURE, BOTR_QUERY_ENCODE_SET};
use percent_encoding::utf8_percent_encode;

/// Percent-encode one key or value.
///
/// ```
/// use botr_system_api::canonical::encode;
///
/// assert_eq!(encode("a b~c+d"), "a%20b~c%2Bd");
/// ```
pub fn encode(s: &str) -> String {
    utf8_percent_encode(s, &BOTR_QUERY_ENCODE_SET).to_string()
}

/// Build the sorted, encoded pairs of the given fields.
///
/// `api_signature` is skipped if present: the signature never signs itself.
pub fn canonical_pairs<'a>(
    fields: impl IntoIterator<Item = (&'a str, &'a ArgValue)>,
) -> Vec<(String, String)> {
    let mut raw = fields
        .into_iter()
        .filter(|(k, _)| *k != API_SIGNATURE)
        .flat_map(|(k, v)| v.values().into_iter().map(move |v| (k, v)))
        .collect::<Vec<_>>();
    raw.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    raw.into_iter().map(|(k, v)| (encode(k), encode(v))).collect()
}

/// Join encoded pairs as `k=v&k=v`.
pub fn join_pairs(pairs: &[(String, String)]) -> String {
    let mut s = String::with_capacity(pairs.iter().map(|(k, v)| k.len() + v.len() + 2).sum());
    for (idx, (k, v)) in pairs.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }
        s.push_str(k);
        s.push('=');
        s.push_str(v);
    }
    s
}

/// Build the canonical base string of the given fields.
pub fn canonical_string<'a>(fields: impl IntoIterator<Item = (&'a str, &'a ArgValue)>) -> String {
    join_pairs(&canonical_pairs(fields))
}
