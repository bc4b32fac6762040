//! MCP-specific error types.

use crate::core::error::ContextError;
use crate::mcp::protocol::{
    INGESTION_FAILED, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, NOT_FOUND,
    PARSE_ERROR,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool error (code {0}): {1}")]
    ToolError(i32, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for this failure
    pub fn rpc_code(&self) -> i32 {
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::ToolError(code, _) => *code,
            McpError::InternalError(_) | McpError::Io(_) | McpError::Json(_) => INTERNAL_ERROR,
        }
    }

    /// Message carried by the JSON-RPC error object, without the
    /// variant prefix the `Display` form adds.
    pub fn rpc_message(&self) -> String {
        match self {
            McpError::ParseError(m)
            | McpError::InvalidRequest(m)
            | McpError::MethodNotFound(m)
            | McpError::InvalidParams(m)
            | McpError::InternalError(m)
            | McpError::ToolError(_, m) => m.clone(),
            McpError::Io(e) => format!("I/O error: {e}"),
            McpError::Json(e) => format!("JSON error: {e}"),
        }
    }
}

impl From<ContextError> for McpError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::InvalidQuery(s) => McpError::InvalidParams(s),
            ContextError::NotFound(s) => McpError::ToolError(NOT_FOUND, s),
            e @ (ContextError::CorruptContainer(_)
            | ContextError::UnsupportedFormat(_)
            | ContextError::MalformedToc(_)
            | ContextError::IngestionAborted(_)) => {
                McpError::ToolError(INGESTION_FAILED, e.to_string())
            }
            ContextError::ConfigError(s) => McpError::InvalidParams(s),
            e => McpError::InternalError(e.to_string()),
        }
    }
}
