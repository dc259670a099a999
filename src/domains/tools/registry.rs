//! Tool Registry - central registration and lookup for all tools.
//!
//! This module provides:
//! - [`ToolDescriptor`], the metadata clients see for each tool
//! - [`ToolRegistry`], the name → handler mapping every transport reads from
//!
//! The registry is filled once at startup and then frozen behind an `Arc`;
//! nothing mutates it afterwards, so any number of connections may read it
//! without locking.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};
use tracing::info;

use super::definitions::{CurrentTimeTool, EchoTool};
use super::error::ToolError;
use super::handlers::ToolHandler;

// ============================================================================
// Tool Descriptor
// ============================================================================

/// Metadata describing a registered tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    /// Unique, stable tool name.
    pub name: String,

    /// Human readable description shown to clients.
    pub description: String,

    /// JSON schema of the tool's arguments.
    pub input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    /// Create a new descriptor.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Arc<JsonObject>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// MCP wire shape: `{name, description, inputSchema}`.
    pub fn to_mcp_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": &*self.input_schema,
        })
    }

    /// REST wire shape: `{name, description, parameters}`.
    pub fn to_rest_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": &*self.input_schema,
        })
    }

    /// Convert into the rmcp `Tool` model (for the STDIO transport).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Tool registry - maps tool names to their metadata and handlers.
///
/// Insertion order is preserved so every transport lists tools identically.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in tools.
    ///
    /// This is the central place where built-in tools are registered.
    pub fn with_builtin_tools() -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register(EchoTool::descriptor(), Arc::new(EchoTool))?;
        registry.register(CurrentTimeTool::descriptor(), Arc::new(CurrentTimeTool))?;
        Ok(registry)
    }

    /// Register a tool.
    ///
    /// Fails with [`ToolError::Duplicate`] when the name is already taken.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), ToolError> {
        if self.index.contains_key(&descriptor.name) {
            return Err(ToolError::duplicate(descriptor.name));
        }

        info!("Registering tool: {}", descriptor.name);
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// List all tool descriptors in registration order.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Resolve a tool handler by name.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ToolHandler>, ToolError> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.tools[i].handler))
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// Check whether a tool is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get all tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor.name.as_str()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tool is registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rmcp::model::{CallToolResult, Content};

    struct Fixed(&'static str);

    #[async_trait]
    impl ToolHandler for Fixed {
        async fn invoke(&self, _arguments: JsonObject) -> Result<CallToolResult, ToolError> {
            Ok(CallToolResult::success(vec![Content::text(self.0)]))
        }
    }

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, format!("{name} tool"), Arc::new(JsonObject::new()))
    }

    #[test]
    fn test_registry_builtin_tools() {
        let registry = ToolRegistry::with_builtin_tools().unwrap();
        assert_eq!(registry.names(), vec!["echo", "current_time"]);
        assert!(registry.contains("echo"));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_registry_preserves_insertion_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(descriptor(name), Arc::new(Fixed(""))).unwrap();
        }

        let listed: Vec<_> = registry.list().iter().map(|d| d.name.clone()).collect();
        assert_eq!(listed, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_registry_rejects_duplicate() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("echo"), Arc::new(Fixed("a"))).unwrap();

        let err = registry
            .register(descriptor("echo"), Arc::new(Fixed("b")))
            .unwrap_err();
        assert!(matches!(err, ToolError::Duplicate(ref name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_resolve_unknown() {
        let registry = ToolRegistry::new();
        let err = registry.resolve("missing").err().unwrap();
        assert!(matches!(err, ToolError::NotFound(ref name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_registry_resolve_invokes_matching_handler() {
        let mut registry = ToolRegistry::new();
        registry.register(descriptor("a"), Arc::new(Fixed("first"))).unwrap();
        registry.register(descriptor("b"), Arc::new(Fixed("second"))).unwrap();

        let result = registry
            .resolve("b")
            .unwrap()
            .invoke(JsonObject::new())
            .await
            .unwrap();
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "second");
    }

    #[test]
    fn test_descriptor_wire_shapes() {
        let d = descriptor("echo");
        assert_eq!(d.to_mcp_json()["inputSchema"], serde_json::json!({}));
        assert_eq!(d.to_rest_json()["parameters"], serde_json::json!({}));
        assert_eq!(d.to_tool().name, "echo");
    }
}
