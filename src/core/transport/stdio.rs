//! STDIO transport implementation.
//!
//! Speaks MCP over stdin/stdout through rmcp, with [`McpServer`] as the
//! handler. Logging goes to stderr so stdout carries protocol frames only.

use rmcp::ServiceExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the client disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");
        let (stdin, stdout) = rmcp::transport::stdio();
        Self::serve(server, stdin, stdout).await?;
        info!("STDIO transport finished");
        Ok(())
    }

    /// Serve MCP over an arbitrary byte stream pair.
    pub async fn serve<R, W>(server: McpServer, reader: R, writer: W) -> TransportResult<()>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let service = server
            .serve((reader, writer))
            .await
            .map_err(TransportError::handshake)?;

        service
            .waiting()
            .await
            .map_err(TransportError::session)?;

        Ok(())
    }
}
