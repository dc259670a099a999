//! Plain REST endpoints: `GET /tools` and `POST /call-tool`.
//!
//! Tool failures surface as HTTP 400 with a `detail` body here, unlike the
//! JSON-RPC transports which report them inside a successful `result`.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{debug, warn};

use super::{ApiError, AppState};
use crate::domains::tools::{CallOutcome, CallRequest, ToolDescriptor};

/// List every registered tool with its parameter schema.
pub async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    let tools: Vec<_> = state
        .server
        .list_tools()
        .into_iter()
        .map(ToolDescriptor::to_rest_json)
        .collect();
    debug!("REST: listing {} tools", tools.len());
    Json(json!({ "tools": tools }))
}

/// Execute a tool and return its text payload.
pub async fn call_tool(
    State(state): State<AppState>,
    payload: Result<Json<CallRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let tool_name = request.tool_name.clone();

    match state
        .server
        .call_tool(request.tool_name, request.arguments)
        .await
    {
        CallOutcome::Success { text } => Ok(Json(json!({
            "success": true,
            "result": text,
            "tool_name": tool_name
        }))),
        CallOutcome::Failure { message } => {
            warn!("REST call to '{}' failed: {}", tool_name, message);
            Err(ApiError::bad_request(message))
        }
    }
}
