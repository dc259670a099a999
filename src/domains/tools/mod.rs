//! Tools domain module.
//!
//! This module handles all tool-related functionality of the gateway.
//! Tools are executable functions that clients call through any transport.
//!
//! ## Architecture
//!
//! - `definitions/` - Built-in tool implementations (one file per tool)
//! - `handlers.rs` - The `ToolHandler` capability and the `SyncTool` adapter
//! - `registry.rs` - Name → descriptor/handler mapping, frozen after startup
//! - `dispatcher.rs` - Lookup, invocation and result normalization
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, `descriptor()`, and implement `ToolHandler`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `ToolRegistry::with_builtin_tools()`
//!
//! Transports never need to change: they all read the same registry.

pub mod definitions;
mod dispatcher;
mod error;
mod handlers;
mod registry;

pub use dispatcher::{CallOutcome, CallRequest, Dispatcher, extract_text};
pub use error::ToolError;
pub use handlers::{SyncTool, ToolHandler, parse_arguments};
pub use registry::{ToolDescriptor, ToolRegistry};
