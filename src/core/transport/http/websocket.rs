//! JSON-RPC over WebSocket on `/ws`.
//!
//! Every text frame is one request and gets exactly one reply frame. Bad
//! frames are answered with a JSON-RPC error and the socket stays open; only
//! a close frame or a transport failure ends the connection.

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::AppState;
use super::jsonrpc::{tools_call, tools_list};
use crate::core::McpServer;
use crate::core::protocol::{JsonRpcRequest, JsonRpcResponse, initialize_result, methods};

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    info!("WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, state.server))
}

/// Serve one established connection until it closes.
async fn handle_socket(socket: WebSocket, server: McpServer) {
    debug!("WebSocket connection established");
    let (mut ws_sink, mut ws_stream) = socket.split();

    while let Some(result) = ws_stream.next().await {
        let response = match result {
            Ok(Message::Text(text)) => handle_message(&server, text.as_str()).await,
            Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                Ok(text) => handle_message(&server, text).await,
                Err(_) => {
                    debug!("Binary frame is not valid UTF-8");
                    JsonRpcResponse::parse_error()
                }
            },
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
            Ok(Message::Close(_)) => {
                debug!("Received close frame");
                break;
            }
            Err(e) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
        };

        let json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize WebSocket response: {}", e);
                break;
            }
        };

        if let Err(e) = ws_sink.send(Message::Text(json.into())).await {
            warn!("WebSocket send failed: {}", e);
            break;
        }
    }

    info!("WebSocket disconnected");
}

/// Answer one text frame.
pub async fn handle_message(server: &McpServer, text: &str) -> JsonRpcResponse {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            debug!("WebSocket parse error: {}", e);
            return JsonRpcResponse::parse_error();
        }
    };

    let Some(object) = value.as_object() else {
        return JsonRpcResponse::invalid_request(Some(Value::Null));
    };

    let request = JsonRpcRequest::from_object(object);
    let id = request.reply_id();
    debug!("WebSocket request: {}", request.method_or_null());

    match request.method.as_deref() {
        Some(methods::INITIALIZE) => {
            JsonRpcResponse::success(id, initialize_result(&server.identity()))
        }
        Some(methods::TOOLS_LIST) => tools_list(server, id),
        Some(methods::TOOLS_CALL) => tools_call(server, id, request.params.as_ref()).await,
        _ => JsonRpcResponse::method_not_found(id, request.method_or_null()),
    }
}
