//! Gateway server facade and rmcp integration.
//!
//! [`McpServer`] bundles the frozen tool registry, the dispatcher and the
//! server identity. It is built once in `main` and cloned into whichever
//! transport runs; every clone shares the same registry.
//!
//! ## Tool Architecture
//!
//! Tools live in `domains/tools/`. Transports never touch a handler directly:
//! they list descriptors through [`McpServer::list_tools`] and call through
//! [`McpServer::call_tool`], which goes through the dispatcher.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, JsonObject, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use super::protocol::ServerIdentity;
use crate::domains::tools::{
    CallOutcome, CallRequest, Dispatcher, ToolDescriptor, ToolRegistry,
};

/// The gateway server handle shared by all transports.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher over the frozen tool registry.
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a server exposing the built-in tools.
    pub fn new(config: Config) -> Result<Self> {
        let registry = ToolRegistry::with_builtin_tools()?;
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server exposing the tools of the given registry.
    ///
    /// The registry is frozen from here on.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        info!("Serving {} tools: {:?}", registry.len(), registry.names());
        Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(Arc::new(registry)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Identity reported to clients as `serverInfo`.
    pub fn identity(&self) -> ServerIdentity {
        ServerIdentity {
            name: self.name().to_string(),
            version: self.version().to_string(),
        }
    }

    /// The tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        self.dispatcher.registry()
    }

    /// List all tools, read from the registry on every call.
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.registry().list()
    }

    /// Call a tool by name.
    pub async fn call_tool(&self, name: impl Into<String>, arguments: JsonObject) -> CallOutcome {
        self.dispatcher
            .dispatch(CallRequest::new(name, arguments))
            .await
    }
}

/// ServerHandler implementation used by the STDIO transport.
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "{} exposes {} tools. Use tools/list to discover them.",
                self.name(),
                self.registry().len()
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        let tools = self
            .list_tools()
            .into_iter()
            .map(ToolDescriptor::to_tool)
            .collect();
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let outcome = McpServer::call_tool(
            self,
            request.name.to_string(),
            request.arguments.unwrap_or_default(),
        )
        .await;

        Ok(match outcome {
            CallOutcome::Success { text } => CallToolResult::success(vec![Content::text(text)]),
            CallOutcome::Failure { message } => CallToolResult::error(vec![Content::text(message)]),
        })
    }
}
