//! HTTP transport implementation.
//!
//! One axum server hosts all four gateway adapters on top of the same
//! [`McpServer`]:
//!
//! - **REST**: `GET /tools`, `POST /call-tool`
//! - **JSON-RPC over HTTP**: `GET /mcp`, `POST /mcp`
//! - **SSE**: `GET /sse`
//! - **WebSocket**: `/ws`
//!
//! plus liveness and discovery endpoints (`/`, `/health`, `/test-connection`,
//! `/n8n`).

mod error;
pub mod jsonrpc;
pub mod rest;
pub mod sse;
pub mod websocket;

pub use error::ApiError;

use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::McpServer;
use crate::core::protocol::{JSONRPC_VERSION, PROTOCOL_VERSION, tools_json};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The gateway server instance.
    pub(crate) server: McpServer,
    /// Interval between SSE heartbeats.
    pub(crate) sse_heartbeat: Duration,
}

impl AppState {
    /// Create the handler state for a server.
    pub fn new(server: McpServer, sse_heartbeat: Duration) -> Self {
        Self {
            server,
            sse_heartbeat,
        }
    }
}

/// Build the gateway router with every adapter mounted.
pub fn build_router(server: McpServer, config: &HttpConfig) -> Router {
    let state = AppState::new(server, config.sse_heartbeat());

    let mut app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/test-connection", get(test_connection))
        .route("/n8n", get(n8n_discovery))
        .route("/tools", get(rest::list_tools))
        .route("/call-tool", post(rest::call_tool))
        .route("/mcp", get(jsonrpc::discover).post(jsonrpc::handle_rpc))
        .route("/sse", get(sse::sse_handler))
        .route("/ws", get(websocket::ws_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    // Add CORS if enabled
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → REST:      GET /tools, POST /call-tool");
        info!("  → JSON-RPC:  GET|POST /mcp");
        info!(
            "  → SSE:       GET /sse (heartbeat every {}s)",
            self.config.sse_heartbeat_secs
        );
        info!("  → WebSocket: /ws");
        info!("  → Health:    GET /health");

        axum::serve(listener, app)
            .await
            .map_err(TransportError::Serve)?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "tools": "/tools",
            "call_tool": "/call-tool",
            "rpc": "/mcp",
            "sse": "/sse",
            "websocket": "/ws",
            "health": "/health"
        },
        "protocol": format!("JSON-RPC {}", JSONRPC_VERSION),
        "protocolVersion": PROTOCOL_VERSION
    }))
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "server": state.server.name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Connection test endpoint for integration debugging.
async fn test_connection(State(state): State<AppState>) -> impl IntoResponse {
    info!("Test connection endpoint called");
    let names = state.server.registry().names();
    Json(serde_json::json!({
        "status": "success",
        "message": "MCP server is running and accessible",
        "server": state.server.name(),
        "version": state.server.version(),
        "tools_count": names.len(),
        "tools": names,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Discovery document for n8n style integrations.
async fn n8n_discovery(State(state): State<AppState>) -> impl IntoResponse {
    let tools = tools_json(state.server.list_tools());
    info!("n8n discovery: {} tools available", tools.len());
    Json(serde_json::json!({
        "serverInfo": state.server.identity(),
        "capabilities": {
            "tools": {}
        },
        "tools": tools
    }))
}
