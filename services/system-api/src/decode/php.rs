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

//! Reader for the output of PHP's `serialize()`.
//!
//! Supported values: `N;`, `b:<0|1>;`, `i:<int>;`, `d:<float>;`,
//! `s:<len>:"<bytes>";`, `a:<n>:{<key><value>...}` and
//! `O:<len>:"<class>":<n>:{<key><value>...}`. String lengths count bytes.

use super::MAX_DEPTH;
use anyhow::{anyhow, bail, Result};
use serde_json::{Map, Number, Value};

/// Parse one serialized value spanning the whole input.
pub(super) fn unserialize(input: &[u8]) -> Result<Value> {
    let mut p = Parser {
        input,
        pos: 0,
        depth: 0,
    };
    let v = p.value()?;
    if p.pos != input.len() {
        bail!("trailing data at byte {}", p.pos);
    }
    Ok(v)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn value(&mut self) -> Result<Value> {
        let tag = self.next()?;
        match tag {
            b'N' => {
                self.expect(b';')?;
                Ok(Value::Null)
            }
            b'b' => {
                self.expect(b':')?;
                let v = match self.until(b';')? {
                    b"0" => false,
                    b"1" => true,
                    v => bail!("invalid boolean {:?}", String::from_utf8_lossy(v)),
                };
                Ok(Value::Bool(v))
            }
            b'i' => {
                self.expect(b':')?;
                Ok(Value::Number(self.integer(b';')?.into()))
            }
            b'd' => {
                self.expect(b':')?;
                let raw = std::str::from_utf8(self.until(b';')?)?;
                let v: f64 = raw.parse()?;
                Number::from_f64(v)
                    .map(Value::Number)
                    .ok_or_else(|| anyhow!("float {raw} has no JSON representation"))
            }
            b's' => {
                self.expect(b':')?;
                let s = self.string()?;
                self.expect(b';')?;
                Ok(Value::String(s))
            }
            b'a' => {
                self.expect(b':')?;
                self.array()
            }
            b'O' => {
                self.expect(b':')?;
                // Class name is dropped; only the properties are kept.
                let _class = self.string()?;
                self.expect(b':')?;
                let entries = self.entries()?;
                Ok(Value::Object(
                    entries
                        .into_iter()
                        .map(|(k, v)| (property_name(&k).to_string(), v))
                        .collect(),
                ))
            }
            t => bail!(
                "unexpected type tag {:?} at byte {}",
                char::from(t),
                self.pos - 1
            ),
        }
    }

    /// `<n>:{...}` with `n` key/value pairs.
    fn array(&mut self) -> Result<Value> {
        let entries = self.entries()?;

        let is_list = entries
            .iter()
            .enumerate()
            .all(|(idx, (k, _))| *k == idx.to_string());
        if is_list {
            return Ok(Value::Array(entries.into_iter().map(|(_, v)| v).collect()));
        }

        let mut map = Map::new();
        for (k, v) in entries {
            map.insert(k, v);
        }
        Ok(Value::Object(map))
    }

    fn entries(&mut self) -> Result<Vec<(String, Value)>> {
        if self.depth >= MAX_DEPTH {
            bail!("nesting deeper than {MAX_DEPTH} at byte {}", self.pos);
        }
        self.depth += 1;
        let entries = self.entries_inner();
        self.depth -= 1;
        entries
    }

    fn entries_inner(&mut self) -> Result<Vec<(String, Value)>> {
        let n = self.length(b':')?;
        self.expect(b'{')?;
        let mut entries = Vec::with_capacity(n.min(1024));
        for _ in 0..n {
            let key = match self.value()? {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                v => bail!("invalid array key {v}"),
            };
            let value = self.value()?;
            entries.push((key, value));
        }
        self.expect(b'}')?;
        Ok(entries)
    }

    /// `<len>:"<bytes>"`
    fn string(&mut self) -> Result<String> {
        let len = self.length(b':')?;
        self.expect(b'"')?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.input.len())
            .ok_or_else(|| anyhow!("string of {len} bytes runs past the end of input"))?;
        let s = String::from_utf8_lossy(&self.input[self.pos..end]).into_owned();
        self.pos = end;
        self.expect(b'"')?;
        Ok(s)
    }

    fn integer(&mut self, terminator: u8) -> Result<i64> {
        let raw = std::str::from_utf8(self.until(terminator)?)?;
        Ok(raw.parse()?)
    }

    fn length(&mut self, terminator: u8) -> Result<usize> {
        let raw = std::str::from_utf8(self.until(terminator)?)?;
        Ok(raw.parse()?)
    }

    /// Bytes up to `terminator`, which is consumed.
    fn until(&mut self, terminator: u8) -> Result<&[u8]> {
        let rest = &self.input[self.pos..];
        let idx = rest
            .iter()
            .position(|b| *b == terminator)
            .ok_or_else(|| anyhow!("missing {:?} after byte {}", char::from(terminator), self.pos))?;
        self.pos += idx + 1;
        Ok(&rest[..idx])
    }

    fn next(&mut self) -> Result<u8> {
        let b = *self
            .input
            .get(self.pos)
            .ok_or_else(|| anyhow!("unexpected end of input"))?;
        self.pos += 1;
        Ok(b)
    }

    fn expect(&mut self, want: u8) -> Result<()> {
        let pos = self.pos;
        let got = self.next()?;
        if got != want {
            bail!(
                "expected {:?} at byte {pos}, found {:?}",
                char::from(want),
                char::from(got)
            );
        }
        Ok(())
    }
}

/// Strip the `\0Class\0` and `\0*\0` prefixes of private and protected properties.
fn property_name(name: &str) -> &str {
    match name.strip_prefix('\0') {
        Some(rest) => rest.split_once('\0').map_or(rest, |(_, name)| name),
        None => name,
    }
}
