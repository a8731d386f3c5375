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

mod mock;

mod call;
mod concurrency;
mod upload;

use botr_core::{Capabilities, Context};
use botr_file_read_tokio::TokioFileRead;
use botr_system_api::{Client, Config};
use mock::MockHttpSend;

pub const API_KEY: &str = "XOqEAfxj";
pub const API_SECRET: &str = "uA96CFtJa138E2T5GhKfngml";

/// Build a client over a fresh mock transport with the given capabilities.
pub fn init_client(caps: Capabilities, config: Config) -> (Client, MockHttpSend) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mock = MockHttpSend::new(caps);
    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(mock.clone());
    let client = Client::new(ctx, config).expect("config must be valid");

    (client, mock)
}

pub fn default_config() -> Config {
    Config::new(API_KEY, API_SECRET).with_endpoint("http://api.test")
}
