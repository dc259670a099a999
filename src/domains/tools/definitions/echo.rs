//! Echo tool definition.
//!
//! Returns its input unchanged. Useful for probing a transport end to end.

use async_trait::async_trait;
use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Content, JsonObject},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler, parse_arguments};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the echo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoParams {
    /// Text to send back.
    pub text: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Echo tool - returns the given text.
pub struct EchoTool;

impl EchoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "echo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Echo the given text back to the caller.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(params: &EchoParams) -> CallToolResult {
        debug!("Echoing {} bytes", params.text.len());
        CallToolResult::success(vec![Content::text(params.text.clone())])
    }

    /// Create the descriptor for this tool (metadata).
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            schema_for_type::<EchoParams>().into(),
        )
    }
}

#[async_trait]
impl ToolHandler for EchoTool {
    async fn invoke(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: EchoParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_returns_text() {
        let args = serde_json::json!({ "text": "hello" });
        let result = EchoTool
            .invoke(args.as_object().cloned().unwrap())
            .await
            .unwrap();

        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_echo_missing_text() {
        let result = EchoTool.invoke(JsonObject::new()).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn test_echo_schema_requires_text() {
        let descriptor = EchoTool::descriptor();
        assert_eq!(descriptor.name, "echo");
        let required = descriptor.input_schema.get("required").cloned();
        assert_eq!(required, Some(serde_json::json!(["text"])));
    }
}
