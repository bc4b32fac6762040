//! bsl-context MCP server binary.
//!
//! A stdio-based MCP server exposing the 1C platform API reference as
//! tools for AI assistants.

use bsl_context::core::config::Config;
use bsl_context::core::services::Services;
use bsl_context::mcp::McpServer;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout belongs to JSON-RPC
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });
    config.log_config();

    let services = Services::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to initialize services: {e}");
        std::process::exit(1);
    });

    let mut server = McpServer::new(services);

    if let Err(e) = server.run().await {
        eprintln!("MCP server error: {e}");
        std::process::exit(1);
    }
}
