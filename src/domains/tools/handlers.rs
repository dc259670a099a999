//! Tool handlers module.
//!
//! A tool handler is the invocable half of a registered tool. The gateway
//! only cares about its call/return shape: arguments go in as a JSON object,
//! a [`CallToolResult`] (or an error) comes out.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use serde::de::DeserializeOwned;

use super::error::ToolError;

/// Trait implemented by every invocable tool.
///
/// Handlers may perform arbitrary I/O. Blocking work should go through
/// [`SyncTool`] so it runs on the blocking thread pool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with the given arguments.
    async fn invoke(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError>;
}

/// Adapter turning a blocking closure into a [`ToolHandler`].
///
/// The closure runs inside `tokio::task::spawn_blocking`, so file parsing or
/// blocking HTTP clients do not stall the connection tasks of other clients.
pub struct SyncTool<F> {
    func: Arc<F>,
}

impl<F> SyncTool<F>
where
    F: Fn(JsonObject) -> Result<CallToolResult, ToolError> + Send + Sync + 'static,
{
    /// Wrap a blocking closure.
    pub fn new(func: F) -> Self {
        Self {
            func: Arc::new(func),
        }
    }
}

#[async_trait]
impl<F> ToolHandler for SyncTool<F>
where
    F: Fn(JsonObject) -> Result<CallToolResult, ToolError> + Send + Sync + 'static,
{
    async fn invoke(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let func = Arc::clone(&self.func);
        match tokio::task::spawn_blocking(move || func(arguments)).await {
            Ok(result) => result,
            Err(e) if e.is_panic() => Err(ToolError::execution_failed(format!(
                "tool panicked: {}",
                panic_message(e.into_panic().as_ref())
            ))),
            Err(e) => Err(ToolError::internal(e.to_string())),
        }
    }
}

/// Deserialize a tool's argument object into its typed parameters.
pub fn parse_arguments<T: DeserializeOwned>(arguments: JsonObject) -> Result<T, ToolError> {
    Ok(serde_json::from_value(serde_json::Value::Object(arguments))?)
}

/// Best-effort rendering of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        text: String,
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_sync_tool_runs_closure() {
        let tool = SyncTool::new(|arguments| {
            let params: Params = parse_arguments(arguments)?;
            Ok(CallToolResult::success(vec![Content::text(params.text)]))
        });

        let result = tool.invoke(args(serde_json::json!({ "text": "hi" }))).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_sync_tool_panic_becomes_error() {
        let tool = SyncTool::new(|_| -> Result<CallToolResult, ToolError> {
            panic!("boom");
        });

        let err = tool.invoke(JsonObject::new()).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_parse_arguments_rejects_missing_field() {
        let result: Result<Params, _> = parse_arguments(JsonObject::new());
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn test_panic_message_variants() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "unknown panic");
    }
}
