//! Transport error types.
//!
//! These cover starting and running a transport. Per-request failures never
//! show up here: adapters answer them on the wire and keep serving.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures that stop a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP listener could not bind its address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped accepting connections.
    #[error("HTTP server failed: {0}")]
    Serve(#[source] std::io::Error),

    /// The MCP handshake on stdio did not complete.
    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    /// The stdio session ended with an error.
    #[error("MCP session failed: {0}")]
    Session(String),

    /// Transport settings the server cannot run with.
    #[error("Invalid transport settings: {0}")]
    InvalidConfig(String),
}

impl TransportError {
    /// Create a bind error for the given address.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    /// Create a handshake error.
    pub fn handshake(msg: impl ToString) -> Self {
        Self::Handshake(msg.to_string())
    }

    /// Create a session error.
    pub fn session(msg: impl ToString) -> Self {
        Self::Session(msg.to_string())
    }

    /// Create an invalid settings error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_names_address() {
        let source = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use");
        let err = TransportError::bind("127.0.0.1:8000", source);
        assert_eq!(err.to_string(), "Failed to bind to 127.0.0.1:8000: in use");
        assert!(std::error::Error::source(&err).is_some());
    }
}
