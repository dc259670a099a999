//! MCP Tool Gateway Library
//!
//! This crate exposes one registry of callable tools over several transports
//! at once: plain REST, JSON-RPC over HTTP, Server-Sent Events, WebSocket and
//! MCP over stdio.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, protocol shapes, the server
//!   facade and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the tool registry, the dispatcher and the built-in tools
//! - **cli**: command line overrides for the configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_gateway::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
