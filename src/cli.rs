//! Command line interface.
//!
//! Flags override whatever the environment configured.

use clap::Parser;

use crate::core::Config;
#[cfg(feature = "http")]
use crate::core::transport::{HttpConfig, TransportConfig};

/// Multi-transport MCP tool gateway.
#[derive(Debug, Default, Parser)]
#[command(name = "mcp-gateway", version, about)]
pub struct Cli {
    /// Serve the HTTP gateway (REST, JSON-RPC, SSE, WebSocket) instead of stdio.
    #[cfg(feature = "http")]
    #[arg(long)]
    pub http: bool,

    /// Host address to bind the HTTP gateway to.
    #[cfg(feature = "http")]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the HTTP gateway to.
    #[cfg(feature = "http")]
    #[arg(long)]
    pub port: Option<u16>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Apply the command line overrides to a loaded configuration.
    ///
    /// `--host` and `--port` imply `--http`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        #[cfg(feature = "http")]
        {
            if self.http || self.host.is_some() || self.port.is_some() {
                let mut http = match &config.transport {
                    TransportConfig::Http(http) => http.clone(),
                    #[allow(unreachable_patterns)]
                    _ => HttpConfig::from_env(),
                };
                if let Some(host) = &self.host {
                    http.host = host.clone();
                }
                if let Some(port) = self.port {
                    http.port = port;
                }
                config.transport = TransportConfig::Http(http);
            }
        }
    }
}
