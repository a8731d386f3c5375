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

use super::{default_config, init_client, API_KEY, API_SECRET};
use anyhow::Result;
use botr_core::{Capabilities, ErrorKind};
use botr_system_api::canonical::canonical_string;
use botr_system_api::signer::sign;
use botr_system_api::{ArgValue, Args, Format, Response, KIT};
use bytes::Bytes;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_call_sends_signed_get() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());
    mock.reply(StatusCode::OK, br#"a:1:{s:6:"status";s:2:"ok";}"#);

    let resp = client
        .call(
            "/videos/show",
            &Args::new()
                .with("video_key", "yYul4DRz")
                .with("title", "Cats & dogs ~ 100+"),
        )
        .await?;
    assert_eq!(resp, Response::Decoded(json!({"status": "ok"})));

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, http::Method::GET);
    assert!(req.uri.starts_with("http://api.test/v1/videos/show?"));
    assert!(req.uri.contains("title=Cats%20%26%20dogs%20~%20100%2B"));

    assert_eq!(req.query_get("api_key").as_deref(), Some(API_KEY));
    assert_eq!(req.query_get("api_kit").as_deref(), Some(KIT));
    assert_eq!(req.query_get("api_format").as_deref(), Some("php"));
    let nonce = req.query_get("api_nonce").unwrap();
    assert_eq!(nonce.len(), 8);
    assert!(req.query_get("api_timestamp").unwrap().parse::<i64>()? > 0);

    // The server side check: re-canonicalize what was sent and sign it.
    let signature = req.query_get("api_signature").unwrap();
    let sent = req
        .query()
        .into_iter()
        .filter(|(k, _)| k != "api_signature")
        .collect::<Args>();
    assert_eq!(sign(&canonical_string(sent.iter()), API_SECRET), signature);
    Ok(())
}

#[tokio::test]
async fn test_call_with_list_argument() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());

    client
        .call(
            "/videos/list",
            &Args::new().with("tags", vec!["b", "a"]).with("statuses_filter", "ready"),
        )
        .await?;

    let req = &mock.requests()[0];
    let tags = req
        .query()
        .into_iter()
        .filter(|(k, _)| k == "tags")
        .map(|(_, v)| v)
        .collect::<Vec<_>>();
    assert_eq!(tags, vec!["b", "a"]);

    let signature = req.query_get("api_signature").unwrap();
    let mut sent = Args::new();
    for (k, v) in req.query() {
        if k == "api_signature" {
            continue;
        }
        let v = match sent.remove(&k) {
            None => ArgValue::from(v),
            Some(ArgValue::List(mut vs)) => {
                vs.push(ArgValue::from(v));
                ArgValue::List(vs)
            }
            Some(prev) => ArgValue::List(vec![prev, ArgValue::from(v)]),
        };
        sent.insert(k, v);
    }
    assert_eq!(sign(&canonical_string(sent.iter()), API_SECRET), signature);
    Ok(())
}

#[tokio::test]
async fn test_call_overwrites_reserved_arguments() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());

    client
        .call(
            "/videos/list",
            &Args::new()
                .with("api_key", "someone-else")
                .with("api_nonce", "00000001")
                .with("api_kit", "php-1.4")
                .with("api_signature", "forged"),
        )
        .await?;

    let req = &mock.requests()[0];
    assert_eq!(req.query_get("api_key").as_deref(), Some(API_KEY));
    assert_eq!(req.query_get("api_kit").as_deref(), Some(KIT));
    assert_ne!(req.query_get("api_signature").as_deref(), Some("forged"));
    assert_eq!(
        req.query()
            .iter()
            .filter(|(k, _)| k.starts_with("api_"))
            .count(),
        6
    );
    Ok(())
}

#[tokio::test]
async fn test_call_format_override_drives_decoding() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());
    mock.reply(StatusCode::OK, br#"{"status":"ok","videos":[]}"#);

    let resp = client
        .call("/videos/list", &Args::new().with("api_format", "json"))
        .await?;
    assert_eq!(resp, Response::Decoded(json!({"status": "ok", "videos": []})));
    assert_eq!(mock.requests()[0].query_get("api_format").as_deref(), Some("json"));
    Ok(())
}

#[tokio::test]
async fn test_call_default_format_from_config() -> Result<()> {
    let (client, mock) = init_client(
        Capabilities::GET_ONLY,
        default_config().with_format(Format::Xml),
    );
    mock.reply(
        StatusCode::OK,
        b"<response><status>ok</status><video><key>yYul4DRz</key></video></response>",
    );

    let resp = client.call("/videos/show", &Args::new()).await?;
    assert_eq!(
        resp,
        Response::Decoded(json!({"status": "ok", "video": {"key": "yYul4DRz"}}))
    );
    Ok(())
}

#[tokio::test]
async fn test_call_decodes_error_status_payload() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());
    mock.reply(
        StatusCode::NOT_FOUND,
        br#"a:3:{s:6:"status";s:5:"error";s:4:"code";s:8:"NotFound";s:7:"message";s:15:"Video not found";}"#,
    );

    let resp = client.call("/videos/show", &Args::new()).await?;
    assert!(resp.is_error());
    assert_eq!(resp.get("code"), Some(&json!("NotFound")));
    Ok(())
}

#[tokio::test]
async fn test_call_keeps_undecodable_payload() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());
    mock.reply(StatusCode::BAD_GATEWAY, b"<html>Bad Gateway</html>");

    let resp = client.call("/videos/list", &Args::new()).await?;
    assert_eq!(
        resp,
        Response::Raw(Bytes::from_static(b"<html>Bad Gateway</html>"))
    );
    Ok(())
}

#[tokio::test]
async fn test_call_transport_failure() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());
    mock.fail("failed to connect: connection refused");

    let err = client
        .call("/videos/list", &Args::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_transport_error());
    Ok(())
}

#[tokio::test]
async fn test_call_with_unknown_format() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());

    let err = client
        .call("/videos/list", &Args::new().with("api_format", "py"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(mock.requests().is_empty());
    Ok(())
}
