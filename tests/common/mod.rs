//! Common test infrastructure
//!
//! Spawns a real gateway on an ephemeral port, with the built-in tools plus a
//! few misbehaving ones, and offers small helpers for talking to it.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use futures::{SinkExt, StreamExt};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use mcp_gateway::core::transport::HttpConfig;
use mcp_gateway::core::transport::http::build_router;
use mcp_gateway::core::{Config, McpServer};
use mcp_gateway::domains::tools::{
    SyncTool, ToolDescriptor, ToolError, ToolHandler, ToolRegistry,
};
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct Failing;

#[async_trait]
impl ToolHandler for Failing {
    async fn invoke(&self, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        Err(ToolError::execution_failed("backend offline"))
    }
}

struct Panicking;

#[async_trait]
impl ToolHandler for Panicking {
    async fn invoke(&self, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        panic!("tool blew up");
    }
}

/// How long the `slow` tool blocks its worker thread.
pub const SLOW_TOOL_DELAY: std::time::Duration = std::time::Duration::from_millis(1500);

/// Built-in tools plus `failing`, `panicking` and the blocking `shout` and
/// `slow` tools.
pub fn test_server() -> McpServer {
    let mut registry = ToolRegistry::with_builtin_tools().expect("builtin tools");
    let schema = Arc::new(JsonObject::new());
    registry
        .register(
            ToolDescriptor::new("failing", "Always fails", schema.clone()),
            Arc::new(Failing),
        )
        .expect("register failing");
    registry
        .register(
            ToolDescriptor::new("panicking", "Always panics", schema.clone()),
            Arc::new(Panicking),
        )
        .expect("register panicking");
    registry
        .register(
            ToolDescriptor::new("shout", "Upper-cases its text argument", schema.clone()),
            Arc::new(SyncTool::new(|arguments: JsonObject| {
                let text = arguments
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_uppercase();
                Ok(CallToolResult::success(vec![rmcp::model::Content::text(
                    text,
                )]))
            })),
        )
        .expect("register shout");
    registry
        .register(
            ToolDescriptor::new("slow", "Sleeps before answering", schema),
            Arc::new(SyncTool::new(|_arguments: JsonObject| {
                std::thread::sleep(SLOW_TOOL_DELAY);
                Ok(CallToolResult::success(vec![rmcp::model::Content::text(
                    "done",
                )]))
            })),
        )
        .expect("register slow");
    McpServer::with_registry(Config::default(), registry)
}

/// In-process router over [`test_server`].
pub fn test_router() -> Router {
    build_router(test_server(), &HttpConfig::default())
}

/// Gateway listening on a random local port.
///
/// Shuts down when dropped.
pub struct TestServer {
    /// Base URL, e.g. `http://127.0.0.1:12345`.
    pub base_url: String,
    _shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = test_router();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn ws_url(&self) -> String {
        self.base_url.replace("http://", "ws://") + "/ws"
    }

    pub async fn connect_ws(&self) -> WsClient {
        let (ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect to WebSocket");
        ws
    }
}

/// Send a text frame and wait for the next text reply.
pub async fn ws_roundtrip(ws: &mut WsClient, text: &str) -> String {
    ws.send(Message::Text(text.into()))
        .await
        .expect("Failed to send frame");
    next_text(ws).await
}

/// Next text frame, skipping control frames.
pub async fn next_text(ws: &mut WsClient) -> String {
    let reply = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while let Some(message) = ws.next().await {
            match message.expect("WebSocket error") {
                Message::Text(text) => return text.as_str().to_string(),
                Message::Close(_) => panic!("socket closed"),
                _ => continue,
            }
        }
        panic!("socket ended")
    })
    .await;
    reply.expect("Timed out waiting for a reply")
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    send(router, request).await
}

pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    use tower::ServiceExt;

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// `(name, description, schema)` triples, sorted by name.
pub fn tool_triples(tools: &Value, schema_key: &str) -> Vec<(String, String, Value)> {
    let mut triples: Vec<_> = tools
        .as_array()
        .expect("tools array")
        .iter()
        .map(|tool| {
            (
                tool["name"].as_str().unwrap_or_default().to_string(),
                tool["description"].as_str().unwrap_or_default().to_string(),
                tool[schema_key].clone(),
            )
        })
        .collect();
    triples.sort_by(|a, b| a.0.cmp(&b.0));
    triples
}
