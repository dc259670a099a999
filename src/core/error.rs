//! Error types and handling for the gateway.
//!
//! Each layer has its own error enum ([`ToolError`], [`TransportError`]);
//! [`Error`] unifies them for code that spans layers.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::tools::ToolError;

/// A specialized Result type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// Tool registration or execution failed.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// A transport could not start or stopped.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
