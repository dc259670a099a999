//! Configuration management for the gateway.
//!
//! Values are layered: built-in defaults, then environment variables
//! (a `.env` file is loaded first when present), then command line flags
//! applied by [`crate::cli::Cli`].
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `MCP_SERVER_NAME` | name reported in `serverInfo` | `mcp-gateway` |
//! | `MCP_LOG_LEVEL` | log level filter | `info` |
//! | `MCP_LOG_TIMESTAMPS` | include timestamps in log lines | `true` |
//!
//! Transport variables are documented in [`crate::core::transport::TransportConfig`].

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Main configuration structure for the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identity.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport selection and settings.
    pub transport: TransportConfig,
}

/// Identity reported to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "mcp-gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            config.logging.with_timestamps = timestamps;
        }
        config.transport = TransportConfig::from_env();

        debug!("Transport configured: {}", config.transport.description());
        config
    }

    /// Check the configuration for values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }
        self.transport.validate()?;
        Ok(())
    }
}
