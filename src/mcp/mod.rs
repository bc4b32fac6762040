//! MCP (Model Context Protocol) server module
//!
//! A JSON-RPC 2.0 compliant MCP server over stdio, exposing the
//! platform context as tools for AI assistants.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::McpError;
pub use server::McpServer;
pub use tools::{McpToolHandler, ToolRegistry};
