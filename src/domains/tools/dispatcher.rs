//! Tool dispatcher - the single choke point every transport calls tools through.
//!
//! The dispatcher resolves a tool, invokes it, and folds whatever happens
//! (success, error result, returned error, panic) into a [`CallOutcome`].
//! Text extraction lives here and nowhere else, so every transport reports
//! the same payload for the same call.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::handlers::panic_message;
use super::registry::ToolRegistry;

/// A single tool invocation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRequest {
    /// The name of the tool to execute.
    pub tool_name: String,

    /// The arguments to pass to the tool.
    #[serde(default)]
    pub arguments: JsonObject,
}

impl CallRequest {
    /// Create a new call request.
    pub fn new(tool_name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Transport-neutral result of a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The tool succeeded and produced this text payload.
    Success { text: String },

    /// The tool could not be found or failed.
    Failure { message: String },
}

impl CallOutcome {
    /// Create a successful outcome.
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    /// Create a failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The payload on success, the message on failure.
    pub fn text(&self) -> &str {
        match self {
            Self::Success { text } => text,
            Self::Failure { message } => message,
        }
    }
}

/// Dispatches call requests against a frozen [`ToolRegistry`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over the given registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this dispatcher resolves tools from.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Resolve and invoke a tool, never letting a handler failure escape.
    #[instrument(skip_all, fields(tool = %request.tool_name))]
    pub async fn dispatch(&self, request: CallRequest) -> CallOutcome {
        let CallRequest {
            tool_name,
            arguments,
        } = request;

        let handler = match self.registry.resolve(&tool_name) {
            Ok(handler) => handler,
            Err(e) => {
                warn!("Unknown tool requested: {}", tool_name);
                return CallOutcome::failure(e.to_string());
            }
        };

        info!("Calling tool: {}", tool_name);

        let invocation = AssertUnwindSafe(handler.invoke(arguments)).catch_unwind();
        match invocation.await {
            Ok(Ok(result)) => {
                let outcome = outcome_from_result(&result);
                if !outcome.is_success() {
                    warn!("Tool {} reported an error result", tool_name);
                }
                outcome
            }
            Ok(Err(e)) => {
                warn!("Error calling tool {}: {}", tool_name, e);
                CallOutcome::failure(e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Tool {} panicked: {}", tool_name, message);
                CallOutcome::failure(format!("Tool '{}' panicked: {}", tool_name, message))
            }
        }
    }
}

/// Fold a handler result into an outcome.
fn outcome_from_result(result: &CallToolResult) -> CallOutcome {
    let text = extract_text(result);
    if result.is_error.unwrap_or(false) {
        CallOutcome::failure(text)
    } else {
        CallOutcome::success(text)
    }
}

/// Extract the text payload of a handler result.
///
/// The first text-bearing content item wins; a result without any text item
/// is rendered as its full JSON serialization.
pub fn extract_text(result: &CallToolResult) -> String {
    let first_text = result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(text) => Some(text.text.clone()),
        _ => None,
    });

    match first_text {
        Some(text) => text,
        None => serde_json::to_string(result).unwrap_or_else(|_| format!("{:?}", result)),
    }
}
