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

//! In-memory transport recording every request it is asked to send.

use async_trait::async_trait;
use botr_core::{Capabilities, Error, HttpSend, MultipartRequest, Result};
use bytes::Bytes;
use http::StatusCode;
use percent_encoding::percent_decode_str;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum Reply {
    Body(StatusCode, Bytes),
    Fail(String),
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: http::Method,
    pub uri: String,
    /// (field name, file name, content)
    pub files: Vec<(String, String, Bytes)>,
}

impl Recorded {
    /// Percent decoded query pairs, in wire order.
    pub fn query(&self) -> Vec<(String, String)> {
        let query = self.uri.split_once('?').map(|(_, q)| q).unwrap_or_default();
        query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| {
                let (k, v) = p.split_once('=').unwrap_or((p, ""));
                (
                    percent_decode_str(k).decode_utf8_lossy().into_owned(),
                    percent_decode_str(v).decode_utf8_lossy().into_owned(),
                )
            })
            .collect()
    }

    pub fn query_get(&self, key: &str) -> Option<String> {
        self.query()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[derive(Debug, Default)]
struct State {
    requests: Vec<Recorded>,
    replies: VecDeque<Reply>,
}

#[derive(Debug, Clone)]
pub struct MockHttpSend {
    caps: Capabilities,
    state: Arc<Mutex<State>>,
}

impl MockHttpSend {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            state: Arc::default(),
        }
    }

    pub fn reply(&self, status: StatusCode, body: &'static [u8]) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Reply::Body(status, Bytes::from_static(body)));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Reply::Fail(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    fn next(&self, recorded: Recorded) -> Result<http::Response<Bytes>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(recorded);
        match state.replies.pop_front() {
            Some(Reply::Body(status, body)) => {
                let mut resp = http::Response::new(body);
                *resp.status_mut() = status;
                Ok(resp)
            }
            Some(Reply::Fail(message)) => Err(Error::transport(message)),
            None => Ok(http::Response::new(Bytes::new())),
        }
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.next(Recorded {
            method: req.method().clone(),
            uri: req.uri().to_string(),
            files: vec![],
        })
    }

    async fn http_send_multipart(&self, req: MultipartRequest) -> Result<http::Response<Bytes>> {
        if !self.caps.multipart {
            return Err(Error::upload("multipart not supported by mock"));
        }

        self.next(Recorded {
            method: http::Method::POST,
            uri: req.uri.to_string(),
            files: req
                .parts
                .into_iter()
                .map(|p| (p.name, p.file_name, p.content))
                .collect(),
        })
    }
}
