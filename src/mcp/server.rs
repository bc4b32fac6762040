//! MCP server: one JSON-RPC request per stdin line.
//!
//! The client owns the process lifetime: the loop ends when it closes
//! stdin, or on an interrupt signal. Requests that fail to parse get a
//! parse-error response with a null id; notifications get nothing.

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse, PARSE_ERROR};
use crate::mcp::transport::StdioTransport;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

pub struct McpServer {
    transport: StdioTransport,
    handlers: ProtocolHandlers,
}

impl McpServer {
    pub fn new(services: Services) -> Self {
        Self {
            transport: StdioTransport::new(),
            handlers: ProtocolHandlers::new(services),
        }
    }

    /// Serve requests from stdin until the client closes it.
    pub async fn run(&mut self) -> Result<(), McpError> {
        info!("bsl-context MCP server listening on stdio");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let next = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break;
                }
            };

            let line = match next {
                Some(line) => line,
                None => break, // client closed stdin
            };
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                self.transport.send(&response).await?;
            }
        }

        info!("MCP server shutting down");
        Ok(())
    }

    /// Parse and dispatch one line; `None` for notifications.
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        debug!("Received: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Invalid JSON-RPC request: {e}"),
                ))
            }
        };

        self.handlers.dispatch(request).await
    }
}
