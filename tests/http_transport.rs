//! Stateless HTTP transport served on an ephemeral port.

mod common;

use std::sync::Arc;

use httpmock::prelude::*;
use mcp_blogger_server::http;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use common::{blog_json, test_config, test_context, ALLOWED_URL};

async fn spawn_server(upstream: &str) -> String {
    let ctx = Arc::new(test_context(&test_config(upstream)));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local_addr");
    tokio::spawn(async move {
        axum::serve(listener, http::router(ctx)).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_endpoint() {
    let base = spawn_server("http://127.0.0.1:9").await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn tool_call_without_handshake() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/blogs/byurl");
            then.status(200).json_body(blog_json());
        })
        .await;

    let base = spawn_server(&upstream.base_url()).await;
    let client = reqwest::Client::new();

    let resp: Value = client
        .post(format!("{base}/mcp"))
        .json(&json!({
            "jsonrpc": "2.0", "id": "a", "method": "tools/call",
            "params": { "name": "get_blog_info_by_url", "arguments": { "url": ALLOWED_URL } }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(resp["id"], "a");
    let text = resp["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload["blog_title"], "Codonomics");
}

#[tokio::test]
async fn notifications_and_parse_errors() {
    let base = spawn_server("http://127.0.0.1:9").await;
    let client = reqwest::Client::new();

    let accepted = client
        .post(format!("{base}/mcp"))
        .body(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status(), reqwest::StatusCode::ACCEPTED);

    let resp: Value = client
        .post(format!("{base}/mcp"))
        .body("{oops")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp["error"]["code"], -32700);
}

#[tokio::test]
async fn tool_call_without_id_is_accepted_silently() {
    let upstream = MockServer::start_async().await;
    let blog = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/blogs/byurl");
            then.status(200).json_body(blog_json());
        })
        .await;

    let base = spawn_server(&upstream.base_url()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/mcp"))
        .json(&json!({
            "jsonrpc": "2.0", "method": "tools/call",
            "params": { "name": "get_blog_info_by_url", "arguments": { "url": ALLOWED_URL } }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), reqwest::StatusCode::ACCEPTED);
    assert!(resp.text().await.unwrap().is_empty());
    blog.assert_hits_async(0).await;
}
