//! Request dispatch for the MCP protocol methods.
//!
//! Every handler produces a result payload or an [`McpError`]; the
//! dispatcher turns that into exactly one JSON-RPC response.
//! Notifications yield no response at all.

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{
    InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities,
    ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::mcp::tools::{
    GetConstructorsHandler, GetMemberHandler, GetMembersHandler, InfoHandler, SearchHandler,
    ToolRegistry,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// MCP protocol revision this server speaks
const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct ProtocolHandlers {
    initialized: AtomicBool,
    tools: ToolRegistry,
}

impl ProtocolHandlers {
    pub fn new(services: Services) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(SearchHandler::new(services.clone())));
        tools.register(Arc::new(InfoHandler::new(services.clone())));
        tools.register(Arc::new(GetMemberHandler::new(services.clone())));
        tools.register(Arc::new(GetMembersHandler::new(services.clone())));
        tools.register(Arc::new(GetConstructorsHandler::new(services)));

        Self {
            initialized: AtomicBool::new(false),
            tools,
        }
    }

    /// Route one request to its handler.
    ///
    /// Notifications return `None`; everything else returns exactly
    /// one response, errors included.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();

        let result = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "initialized" | "notifications/initialized" => {
                self.initialized.store(true, Ordering::SeqCst);
                debug!("Client confirmed initialization");
                return None;
            }
            "tools/list" => Ok(json!({ "tools": self.tools.list() })),
            "tools/call" => self.call_tool(request.params).await,
            "ping" => Ok(json!({})),
            other => Err(McpError::MethodNotFound(format!("Unknown method: {other}"))),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                debug!("Request '{}' failed: {}", request.method, e);
                JsonRpcResponse::error(id, e.rpc_code(), e.rpc_message())
            }
        })
    }

    fn initialize(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| McpError::InvalidParams(format!("Invalid initialize params: {e}")))?;

        let client_protocol = if params.protocol_version.is_empty() {
            "unspecified"
        } else {
            params.protocol_version.as_str()
        };
        info!("Client initialize (protocol {})", client_protocol);

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "bsl-context".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        Ok(serde_json::to_value(result)?)
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params =
            params.ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;
        let call: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| McpError::InvalidParams(format!("Invalid params: {e}")))?;

        let handler = self
            .tools
            .get(&call.name)
            .ok_or_else(|| McpError::InvalidRequest(format!("Tool not found: {}", call.name)))?;

        debug!("Calling tool '{}'", call.name);
        let result = handler.execute(call.arguments).await?;
        Ok(serde_json::to_value(result)?)
    }
}
