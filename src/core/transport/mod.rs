//! Transport layer for the gateway.
//!
//! This module provides the transports the server can be started with:
//! - **STDIO**: MCP over standard input/output via rmcp - feature: `stdio`
//! - **HTTP**: one axum server hosting the REST, JSON-RPC over HTTP, SSE and
//!   WebSocket adapters - feature: `http`
//!
//! Every transport is a thin adapter over the same [`McpServer`](crate::core::McpServer):
//! it translates its wire format into dispatcher calls and back.
//!
//! # Feature Flags
//!
//! - `stdio` (default): STDIO transport - minimal dependencies
//! - `http` (default): HTTP gateway - adds axum, tower, tower-http

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
