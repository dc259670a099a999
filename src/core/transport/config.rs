//! Transport configuration types.
//!
//! Environment variables:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `MCP_TRANSPORT` | `stdio` or `http` | `stdio` |
//! | `MCP_HTTP_HOST` | bind host | `127.0.0.1` |
//! | `MCP_HTTP_PORT` | bind port | `8000` |
//! | `MCP_HTTP_CORS` | permissive CORS (`false`/`0` disables) | on |
//! | `MCP_SSE_HEARTBEAT_SECS` | seconds between SSE heartbeats | `30` |

use serde::{Deserialize, Serialize};

#[cfg(feature = "http")]
use std::{str::FromStr, time::Duration};

use super::error::{TransportError, TransportResult};

/// Which transport the server runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// MCP over stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP gateway: REST, JSON-RPC over HTTP, SSE and WebSocket.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP gateway settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Host address to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Allow any origin, method and header.
    pub enable_cors: bool,

    /// Seconds between SSE heartbeat notifications.
    pub sse_heartbeat_secs: u64,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            enable_cors: true,
            sse_heartbeat_secs: 30,
        }
    }
}

#[cfg(feature = "http")]
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// The `host:port` bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Interval between SSE heartbeats.
    pub fn sse_heartbeat(&self) -> Duration {
        Duration::from_secs(self.sse_heartbeat_secs)
    }

    /// Defaults overridden by whatever `MCP_HTTP_*` variables are set.
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("MCP_HTTP_HOST").unwrap_or(defaults.host),
            port: env_parse("MCP_HTTP_PORT").unwrap_or(defaults.port),
            enable_cors: std::env::var("MCP_HTTP_CORS")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(defaults.enable_cors),
            sse_heartbeat_secs: env_parse("MCP_SSE_HEARTBEAT_SECS")
                .unwrap_or(defaults.sse_heartbeat_secs),
        }
    }

    fn validate(&self) -> TransportResult<()> {
        if self.host.trim().is_empty() {
            return Err(TransportError::invalid_config("HTTP host must not be empty"));
        }
        if self.sse_heartbeat_secs == 0 {
            return Err(TransportError::invalid_config(
                "SSE heartbeat interval must be at least one second",
            ));
        }
        Ok(())
    }
}

impl Default for TransportConfig {
    #[cfg(feature = "stdio")]
    fn default() -> Self {
        Self::Stdio
    }

    #[cfg(not(feature = "stdio"))]
    fn default() -> Self {
        Self::Http(HttpConfig::default())
    }
}

#[cfg(not(any(feature = "stdio", feature = "http")))]
compile_error!("At least one transport feature must be enabled: stdio or http");

impl TransportConfig {
    /// HTTP gateway on the given port and host, other settings default.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Select the transport from `MCP_TRANSPORT`.
    ///
    /// Anything other than `http` selects stdio when it is compiled in.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT").unwrap_or_default();

        #[cfg(feature = "http")]
        if transport.trim().eq_ignore_ascii_case("http") {
            return Self::Http(HttpConfig::from_env());
        }

        #[cfg(feature = "stdio")]
        {
            let _ = transport;
            Self::Stdio
        }

        #[cfg(not(feature = "stdio"))]
        {
            Self::Http(HttpConfig::from_env())
        }
    }

    /// Check the settings of the selected transport.
    pub fn validate(&self) -> TransportResult<()> {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => Ok(()),
            #[cfg(feature = "http")]
            Self::Http(cfg) => cfg.validate(),
        }
    }

    /// One-line description for logs.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}", cfg.address()),
        }
    }

    /// Whether this is the stdio transport.
    pub fn is_stdio(&self) -> bool {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => true,
            #[cfg(feature = "http")]
            Self::Http(_) => false,
        }
    }
}
