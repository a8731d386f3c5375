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

//! XML payloads mapped onto JSON values.
//!
//! The result is the content of the root element. Attributes and child
//! elements become members of an object, repeated children become an array,
//! and an element holding only text becomes a string. Text next to children
//! or attributes is kept under `$text`.

use super::MAX_DEPTH;
use anyhow::{bail, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

const TEXT_KEY: &str = "$text";

struct Node {
    name: String,
    members: Map<String, Value>,
    text: String,
}

impl Node {
    fn start(e: &BytesStart) -> Result<Self> {
        let mut members = Map::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            members.insert(key, Value::String(attr.unescape_value()?.into_owned()));
        }

        Ok(Node {
            name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            members,
            text: String::new(),
        })
    }

    fn finish(mut self) -> (String, Value) {
        if self.members.is_empty() {
            return (self.name, Value::String(self.text));
        }
        if !self.text.is_empty() {
            self.members.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(self.members))
    }

    fn push_child(&mut self, name: String, value: Value) {
        match self.members.get_mut(&name) {
            None => {
                self.members.insert(name, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
}

/// Parse an XML document into the JSON value of its root element.
pub(super) fn parse(input: &[u8]) -> Result<Value> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if root.is_some() {
                    bail!("more than one root element");
                }
                if stack.len() >= MAX_DEPTH {
                    bail!("elements nested deeper than {MAX_DEPTH}");
                }
                stack.push(Node::start(&e)?);
            }
            Event::Empty(e) => {
                if root.is_some() {
                    bail!("more than one root element");
                }
                let (name, value) = Node::start(&e)?.finish();
                match stack.last_mut() {
                    Some(parent) => parent.push_child(name, value),
                    None => root = Some(value),
                }
            }
            Event::End(_) => {
                let Some(node) = stack.pop() else {
                    bail!("closing tag without opening tag");
                };
                let (name, value) = node.finish();
                match stack.last_mut() {
                    Some(parent) => parent.push_child(name, value),
                    None => root = Some(value),
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                match stack.last_mut() {
                    Some(node) => node.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => bail!("text outside of the root element"),
                }
            }
            Event::CData(e) => match stack.last_mut() {
                Some(node) => node.text.push_str(&String::from_utf8_lossy(&e)),
                None => bail!("CDATA outside of the root element"),
            },
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no data.
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        bail!("unexpected end of document inside <{}>", stack[stack.len() - 1].name);
    }
    match root {
        Some(v) => Ok(v),
        None => bail!("document has no root element"),
    }
}
