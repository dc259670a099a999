//! Gateway entry point.
//!
//! Loads configuration (environment, then command line), initializes logging
//! and runs the configured transport.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use mcp_gateway::cli::Cli;
use mcp_gateway::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment, then apply flags
    let mut config = Config::from_env();
    Cli::parse().apply(&mut config);

    // Initialize logging
    init_logging(&config.logging.level, config.logging.with_timestamps);

    config.validate().context("invalid configuration")?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone()).context("failed to build tool registry")?;

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` directives are honored on top of the configured level. Logs
/// always go to stderr; stdout belongs to the stdio transport.
fn init_logging(level: &str, with_timestamps: bool) {
    let level: Level = level.trim().parse().unwrap_or(Level::INFO);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
