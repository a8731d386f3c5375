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

use super::{default_config, init_client};
use anyhow::Result;
use botr_core::Capabilities;
use botr_system_api::Args;
use std::collections::HashSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_calls_use_fresh_nonces() -> Result<()> {
    const CALLS: usize = 200;
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());

    let mut handles = Vec::with_capacity(CALLS);
    for i in 0..CALLS {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .call("/videos/show", &Args::new().with("video_key", i))
                .await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let requests = mock.requests();
    assert_eq!(requests.len(), CALLS);
    let pairs = requests
        .iter()
        .map(|r| {
            (
                r.query_get("api_nonce").unwrap(),
                r.query_get("api_timestamp").unwrap(),
            )
        })
        .collect::<HashSet<_>>();
    assert_eq!(pairs.len(), CALLS);
    Ok(())
}

#[test]
fn test_signing_from_threads() {
    let (client, _mock) = init_client(Capabilities::GET_ONLY, default_config());

    let signatures = std::thread::scope(|s| {
        let handles = (0..8)
            .map(|_| {
                let client = &client;
                s.spawn(move || {
                    (0..25)
                        .map(|_| client.sign(&Args::new()).unwrap().signature().to_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect::<HashSet<_>>()
    });
    assert_eq!(signatures.len(), 200);
}
