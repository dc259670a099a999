//! JSON-RPC envelopes and MCP message shapes shared by every transport.
//!
//! Adapters only translate between their wire format and these shapes; no
//! transport builds protocol JSON by hand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domains::tools::{CallOutcome, CallRequest, ToolDescriptor};

/// JSON-RPC version carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version reported to clients.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Standard JSON-RPC error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Method names understood or emitted by the gateway.
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";

    pub const INITIALIZED: &str = "notifications/initialized";
    pub const TOOLS_LIST_CHANGED: &str = "notifications/tools/list_changed";
    pub const PROGRESS: &str = "notifications/progress";
    pub const ERROR: &str = "notifications/error";
}

// ============================================================================
// Envelopes
// ============================================================================

/// JSON-RPC request structure.
///
/// Every field is optional so that half-formed envelopes still parse and the
/// caller can decide how to report what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Read an envelope out of a decoded JSON object.
    ///
    /// Members of the wrong type are treated as absent, so a numeric `method`
    /// reads the same as a missing one.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            jsonrpc: object
                .get("jsonrpc")
                .and_then(Value::as_str)
                .map(str::to_string),
            id: object.get("id").cloned(),
            method: object
                .get("method")
                .and_then(Value::as_str)
                .map(str::to_string),
            params: object.get("params").cloned(),
        }
    }

    /// The method name for error messages, `null` when missing.
    pub fn method_or_null(&self) -> &str {
        self.method.as_deref().unwrap_or("null")
    }

    /// The id to echo back: the request's id, or `null` when absent.
    pub fn reply_id(&self) -> Option<Value> {
        Some(self.id.clone().unwrap_or(Value::Null))
    }
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error. Carries no id: the request could not be read.
    pub fn parse_error() -> Self {
        Self::error(None, error_codes::PARSE_ERROR, "Parse error")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, error_codes::INVALID_REQUEST, "Invalid Request")
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(
            id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, error_codes::INVALID_PARAMS, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, error_codes::INTERNAL_ERROR, msg)
    }
}

/// JSON-RPC notification (no id, no reply expected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

impl JsonRpcNotification {
    /// Create a notification.
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }

    /// Server capabilities announcement sent when a stream opens.
    pub fn initialized(server: &ServerIdentity) -> Self {
        Self::new(
            methods::INITIALIZED,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "logging": {},
                    "prompts": {}
                },
                "serverInfo": server
            }),
        )
    }

    /// Full tool list announcement.
    pub fn tools_list_changed<'a>(tools: impl IntoIterator<Item = &'a ToolDescriptor>) -> Self {
        Self::new(methods::TOOLS_LIST_CHANGED, tools_list_result(tools))
    }

    /// Keep-alive progress report.
    pub fn heartbeat() -> Self {
        Self::new(
            methods::PROGRESS,
            json!({
                "progressToken": "heartbeat",
                "value": {
                    "kind": "report",
                    "message": "Server alive"
                }
            }),
        )
    }

    /// Terminal error report for a stream.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            methods::ERROR,
            json!({
                "error": {
                    "code": error_codes::INTERNAL_ERROR,
                    "message": message.into()
                }
            }),
        )
    }
}

// ============================================================================
// MCP result shapes
// ============================================================================

/// Server identity reported in `serverInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

/// `initialize` result.
pub fn initialize_result(server: &ServerIdentity) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": server
    })
}

/// `tools/list` result: `{tools: [{name, description, inputSchema}]}`.
pub fn tools_list_result<'a>(tools: impl IntoIterator<Item = &'a ToolDescriptor>) -> Value {
    json!({
        "tools": tools_json(tools)
    })
}

/// Tool descriptors in MCP wire shape.
pub fn tools_json<'a>(tools: impl IntoIterator<Item = &'a ToolDescriptor>) -> Vec<Value> {
    tools.into_iter().map(ToolDescriptor::to_mcp_json).collect()
}

/// Read `tools/call` params into a dispatcher request.
///
/// `params` may be absent and `params.arguments` defaults to `{}`, but
/// `params.name` must be a string.
pub fn parse_call_params(params: Option<&Value>) -> Result<CallRequest, String> {
    let params = match params {
        None | Some(Value::Null) => return Err("Missing params.name".to_string()),
        Some(Value::Object(params)) => params,
        Some(_) => return Err("params must be an object".to_string()),
    };

    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| "Missing params.name".to_string())?;

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(arguments)) => arguments.clone(),
        Some(_) => return Err("params.arguments must be an object".to_string()),
    };

    Ok(CallRequest::new(name, arguments))
}

/// `tools/call` result.
///
/// Success and tool-level failure share this shape; the JSON-RPC `error`
/// member is reserved for protocol faults.
pub fn call_tool_result(outcome: &CallOutcome) -> Value {
    json!({
        "content": [
            {
                "type": "text",
                "text": outcome.text()
            }
        ]
    })
}
