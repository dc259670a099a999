//! Tool definitions module.
//!
//! This module exports the built-in tool definitions.
//! Each tool is defined in its own file and registered in `registry.rs`.

mod current_time;
mod echo;

pub use current_time::{CurrentTimeParams, CurrentTimeTool};
pub use echo::{EchoParams, EchoTool};
