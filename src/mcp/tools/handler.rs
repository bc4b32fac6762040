//! Tool handler trait and shared result helpers.

use crate::mcp::error::McpError;
use crate::mcp::protocol::{ContentBlock, ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Trait for MCP tool implementations
///
/// Each tool (search, info, get_member, ...) implements this trait to
/// provide its schema and execution logic.
#[async_trait]
pub trait McpToolHandler: Send + Sync {
    /// Tool name (e.g. "search")
    fn name(&self) -> &str;

    /// Tool schema for tools/list
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with arguments
    async fn execute(&self, args: Value) -> Result<ToolResult, McpError>;
}

/// Serialize a structured record into a single text content block.
///
/// Rendering records into Markdown is the client's concern; tools hand
/// back raw JSON.
pub fn record_content<T: Serialize>(record: &T) -> Result<ToolResult, McpError> {
    Ok(ToolResult {
        content: vec![ContentBlock::Text {
            text: serde_json::to_string_pretty(record)?,
        }],
    })
}
