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
use botr_core::{Capabilities, ErrorKind};
use botr_system_api::{Args, Format, Response, UploadLink};
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;

const LINK_PAYLOAD: &[u8] = br#"a:2:{s:6:"status";s:2:"ok";s:4:"link";a:4:{s:8:"protocol";s:4:"http";s:7:"address";s:18:"upload.example.com";s:4:"path";s:7:"/upload";s:5:"query";a:2:{s:3:"key";s:1:"k";s:5:"token";s:1:"t";}}}"#;

fn thumbnail() -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new()
        .suffix(".jpg")
        .tempfile()
        .expect("tempfile must be created");
    f.write_all(b"\xff\xd8\xff\xe0 not really a jpeg")
        .expect("tempfile must be writable");
    f
}

#[tokio::test]
async fn test_upload_file_runs_both_phases() -> Result<()> {
    let (client, mock) = init_client(Capabilities::FULL, default_config());
    mock.reply(StatusCode::OK, LINK_PAYLOAD)
        .reply(StatusCode::OK, br#"a:1:{s:6:"status";s:2:"ok";}"#);

    let file = thumbnail();
    let path = file.path().to_str().unwrap();
    let resp = client
        .upload_file(
            "/videos/thumbnails/update",
            &Args::new().with("video_key", "yYul4DRz"),
            path,
        )
        .await?;
    assert_eq!(resp, Response::Decoded(json!({"status": "ok"})));

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, http::Method::GET);
    assert!(requests[0]
        .uri
        .starts_with("http://api.test/v1/videos/thumbnails/update?"));

    let post = &requests[1];
    assert_eq!(post.method, http::Method::POST);
    assert_eq!(
        post.uri,
        "http://upload.example.com/upload?key=k&token=t&api_format=php"
    );
    assert_eq!(post.files.len(), 1);
    let (name, file_name, content) = &post.files[0];
    assert_eq!(name, "file");
    assert!(file_name.ends_with(".jpg"));
    assert_eq!(&content[..], b"\xff\xd8\xff\xe0 not really a jpeg");
    Ok(())
}

#[tokio::test]
async fn test_upload_with_explicit_link_and_format() -> Result<()> {
    let (client, mock) = init_client(Capabilities::FULL, default_config());
    mock.reply(StatusCode::OK, LINK_PAYLOAD)
        .reply(StatusCode::OK, br#"{"status":"ok","media":{"type":"image"}}"#);

    let link: UploadLink = client
        .request_upload_link("/videos/thumbnails/update", &Args::new())
        .await?;
    let file = thumbnail();
    let resp = client
        .upload(link, file.path().to_str().unwrap(), Some(Format::Json))
        .await?;
    assert_eq!(resp.get("media"), Some(&json!({"type": "image"})));
    assert_eq!(
        mock.requests()[1].uri,
        "http://upload.example.com/upload?key=k&token=t&api_format=json"
    );
    Ok(())
}

#[tokio::test]
async fn test_upload_fails_fast_without_multipart_backend() -> Result<()> {
    let (client, mock) = init_client(Capabilities::GET_ONLY, default_config());
    mock.reply(StatusCode::OK, LINK_PAYLOAD);

    let file = thumbnail();
    let err = client
        .upload_file(
            "/videos/thumbnails/update",
            &Args::new(),
            file.path().to_str().unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upload);
    assert!(mock.requests().is_empty());

    // Phase 2 alone refuses as well, before touching the file.
    let link = client
        .request_upload_link("/videos/thumbnails/update", &Args::new())
        .await?;
    let err = client
        .upload(link, "/no/such/file.jpg", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upload);
    assert_eq!(mock.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_upload_surfaces_transport_failure() -> Result<()> {
    let (client, mock) = init_client(Capabilities::FULL, default_config());
    mock.reply(StatusCode::OK, LINK_PAYLOAD)
        .fail("failed to connect: connection refused");

    let file = thumbnail();
    let err = client
        .upload_file(
            "/videos/thumbnails/update",
            &Args::new(),
            file.path().to_str().unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upload);
    assert_eq!(
        err.message(),
        "transport failure: failed to connect: connection refused"
    );
    Ok(())
}

#[tokio::test]
async fn test_upload_link_rejected() -> Result<()> {
    let (client, mock) = init_client(Capabilities::FULL, default_config());
    mock.reply(
        StatusCode::OK,
        br#"a:2:{s:6:"status";s:5:"error";s:7:"message";s:15:"Video not found";}"#,
    );

    let file = thumbnail();
    let err = client
        .upload_file(
            "/videos/thumbnails/update",
            &Args::new().with("video_key", "missing"),
            file.path().to_str().unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upload);
    assert_eq!(mock.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_batch_upload_continues_after_failure() -> Result<()> {
    let (client, mock) = init_client(Capabilities::FULL, default_config());
    mock.reply(StatusCode::OK, LINK_PAYLOAD)
        .fail("request timed out")
        .reply(StatusCode::OK, LINK_PAYLOAD)
        .reply(StatusCode::OK, br#"a:1:{s:6:"status";s:2:"ok";}"#);

    let files = [thumbnail(), thumbnail()];
    let mut outcomes = Vec::new();
    for file in &files {
        outcomes.push(
            client
                .upload_file(
                    "/videos/thumbnails/update",
                    &Args::new(),
                    file.path().to_str().unwrap(),
                )
                .await,
        );
    }

    assert_eq!(outcomes[0].as_ref().unwrap_err().kind(), ErrorKind::Upload);
    assert_eq!(outcomes[1].as_ref().unwrap().status(), Some("ok"));
    assert_eq!(mock.requests().len(), 4);
    Ok(())
}
