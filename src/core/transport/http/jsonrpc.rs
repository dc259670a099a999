//! JSON-RPC over plain HTTP: `GET /mcp` discovery and `POST /mcp` dispatch.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use super::{ApiError, AppState};
use crate::core::McpServer;
use crate::core::protocol::{
    JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse, call_tool_result, initialize_result,
    methods, parse_call_params, tools_json, tools_list_result,
};

/// Discovery document: server identity, capabilities and the tool list.
pub async fn discover(State(state): State<AppState>) -> impl IntoResponse {
    let mut result = initialize_result(&state.server.identity());
    result["tools"] = Value::Array(tools_json(state.server.list_tools()));

    Json(json!({
        "jsonrpc": JSONRPC_VERSION,
        "result": result
    }))
}

/// Handle one JSON-RPC request posted to `/mcp`.
///
/// The body is read raw so that an unparsable envelope is still answered with
/// a JSON-RPC error instead of an extractor rejection.
pub async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            error!("Unparsable JSON-RPC body on /mcp: {}", e);
            return Json(JsonRpcResponse::internal_error(
                Some(Value::Null),
                format!("Parse error: {}", e),
            ))
            .into_response();
        }
    };

    let Some(object) = value.as_object() else {
        warn!("JSON-RPC body on /mcp is not an object");
        return Json(JsonRpcResponse::internal_error(
            Some(Value::Null),
            "Invalid Request: expected a JSON object",
        ))
        .into_response();
    };

    let request = JsonRpcRequest::from_object(object);
    match process_request(&state.server, request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Route a parsed envelope. Only `tools/list` and `tools/call` are served.
async fn process_request(
    server: &McpServer,
    request: JsonRpcRequest,
) -> Result<JsonRpcResponse, ApiError> {
    let id = request.reply_id();
    debug!("POST /mcp: {}", request.method_or_null());

    match request.method.as_deref() {
        Some(methods::TOOLS_LIST) => Ok(tools_list(server, id)),
        Some(methods::TOOLS_CALL) => Ok(tools_call(server, id, request.params.as_ref()).await),
        _ => {
            warn!("Unknown method on /mcp: {}", request.method_or_null());
            Err(ApiError::bad_request(format!(
                "Unknown method: {}",
                request.method_or_null()
            )))
        }
    }
}

/// `tools/list` reply, read from the registry on every call.
pub(super) fn tools_list(server: &McpServer, id: Option<Value>) -> JsonRpcResponse {
    JsonRpcResponse::success(id, tools_list_result(server.list_tools()))
}

/// `tools/call` reply.
///
/// Tool failures land in `result`; only a malformed envelope produces a
/// JSON-RPC `error`.
pub(super) async fn tools_call(
    server: &McpServer,
    id: Option<Value>,
    params: Option<&Value>,
) -> JsonRpcResponse {
    let request = match parse_call_params(params) {
        Ok(request) => request,
        Err(message) => {
            warn!("Malformed tools/call params: {}", message);
            return JsonRpcResponse::invalid_params(id, message);
        }
    };

    info!("JSON-RPC tools/call: {}", request.tool_name);
    let outcome = server
        .call_tool(request.tool_name, request.arguments)
        .await;
    JsonRpcResponse::success(id, call_tool_result(&outcome))
}
