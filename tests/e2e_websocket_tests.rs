//! End-to-end tests for the WebSocket adapter.

#![cfg(feature = "http")]

mod common;

use std::time::Instant;

use common::{SLOW_TOOL_DELAY, TestServer, next_text, ws_roundtrip};
use futures::SinkExt;
use serde_json::{Value, json};
use tokio_tungstenite::tungstenite::Message;

#[tokio::test]
async fn test_parse_error_keeps_socket_open() {
    let server = TestServer::spawn().await;
    let mut ws = server.connect_ws().await;

    let reply = ws_roundtrip(&mut ws, "not-json").await;
    assert_eq!(
        reply,
        r#"{"jsonrpc":"2.0","error":{"code":-32700,"message":"Parse error"}}"#
    );

    let reply = ws_roundtrip(&mut ws, r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).await;
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["id"], 1);
    assert!(reply["result"]["tools"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn test_initialize_then_call() {
    let server = TestServer::spawn().await;
    let mut ws = server.connect_ws().await;

    let reply = ws_roundtrip(
        &mut ws,
        &json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }).to_string(),
    )
    .await;
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(reply["result"]["serverInfo"]["name"], "mcp-gateway");

    let reply = ws_roundtrip(
        &mut ws,
        &json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": { "name": "shout", "arguments": { "text": "quiet" } }
        })
        .to_string(),
    )
    .await;
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["id"], 2);
    assert_eq!(reply["result"]["content"][0]["text"], "QUIET");
}

#[tokio::test]
async fn test_failing_and_panicking_tools_leave_socket_usable() {
    let server = TestServer::spawn().await;
    let mut ws = server.connect_ws().await;

    for (id, tool) in [(1, "failing"), (2, "panicking"), (3, "missing")] {
        let reply = ws_roundtrip(
            &mut ws,
            &json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": { "name": tool }
            })
            .to_string(),
        )
        .await;
        let reply: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(reply["id"], id);
        assert!(reply.get("error").is_none());
        let text = reply["result"]["content"][0]["text"].as_str().unwrap();
        assert!(!text.is_empty());
        if tool == "missing" {
            assert_eq!(text, "Tool 'missing' not found");
        }
    }

    let reply = ws_roundtrip(
        &mut ws,
        &json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": { "name": "echo", "arguments": { "text": "alive" } }
        })
        .to_string(),
    )
    .await;
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["result"]["content"][0]["text"], "alive");
}

#[tokio::test]
async fn test_tools_list_twice_is_identical() {
    let server = TestServer::spawn().await;
    let mut ws = server.connect_ws().await;
    let request = r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#;

    let first = ws_roundtrip(&mut ws, request).await;
    let second = ws_roundtrip(&mut ws, request).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_method_and_binary_frames() {
    let server = TestServer::spawn().await;
    let mut ws = server.connect_ws().await;

    let reply = ws_roundtrip(&mut ws, r#"{"jsonrpc":"2.0","id":5,"method":"ping"}"#).await;
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["error"]["code"], -32601);
    assert_eq!(reply["error"]["message"], "Method not found: ping");

    let frame = br#"{"jsonrpc":"2.0","id":6,"method":"tools/list"}"#.to_vec();
    ws.send(Message::Binary(frame.into())).await.unwrap();
    let reply: Value = serde_json::from_str(&next_text(&mut ws).await).unwrap();
    assert_eq!(reply["id"], 6);
    assert!(reply["result"]["tools"].is_array());
}

#[tokio::test]
async fn test_connections_are_independent() {
    let server = TestServer::spawn().await;
    let mut first = server.connect_ws().await;
    let mut second = server.connect_ws().await;

    let reply = ws_roundtrip(&mut first, "garbage").await;
    assert!(reply.contains("-32700"));

    tokio_test::assert_ok!(first.close(None).await);

    let reply = ws_roundtrip(
        &mut second,
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"echo","arguments":{"text":"solo"}}}"#,
    )
    .await;
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["result"]["content"][0]["text"], "solo");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_slow_call_does_not_block_other_connections() {
    let server = TestServer::spawn().await;
    let mut busy = server.connect_ws().await;
    let mut other = server.connect_ws().await;

    let started = Instant::now();
    busy.send(Message::Text(
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"slow"}}"#.into(),
    ))
    .await
    .unwrap();

    let reply = ws_roundtrip(
        &mut other,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"echo","arguments":{"text":"meanwhile"}}}"#,
    )
    .await;
    assert!(started.elapsed() < SLOW_TOOL_DELAY);
    let reply: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(reply["id"], 2);
    assert_eq!(reply["result"]["content"][0]["text"], "meanwhile");

    let reply: Value = serde_json::from_str(&next_text(&mut busy).await).unwrap();
    assert_eq!(reply["id"], 1);
    assert_eq!(reply["result"]["content"][0]["text"], "done");
    assert!(started.elapsed() >= SLOW_TOOL_DELAY);
}
