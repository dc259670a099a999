//! Current time tool definition.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Content, JsonObject},
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::tools::{ToolDescriptor, ToolError, ToolHandler, parse_arguments};

/// Parameters for the current time tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CurrentTimeParams {
    /// Return a unix timestamp (seconds) instead of RFC 3339.
    #[serde(default)]
    pub unix: bool,
}

/// Current time tool - reports the server's UTC clock.
pub struct CurrentTimeTool;

impl CurrentTimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "current_time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Return the current server time in UTC, as RFC 3339 or as a unix timestamp.";

    /// Execute the tool logic.
    pub fn execute(params: &CurrentTimeParams) -> CallToolResult {
        let now = Utc::now();
        let text = if params.unix {
            now.timestamp().to_string()
        } else {
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        };
        CallToolResult::success(vec![Content::text(text)])
    }

    /// Create the descriptor for this tool (metadata).
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            schema_for_type::<CurrentTimeParams>().into(),
        )
    }
}

#[async_trait]
impl ToolHandler for CurrentTimeTool {
    async fn invoke(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: CurrentTimeParams = parse_arguments(arguments)?;
        Ok(Self::execute(&params))
    }
}
