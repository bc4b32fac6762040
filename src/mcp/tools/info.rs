//! `info` tool handler.

use super::handler::{record_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::ApiType;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct InfoHandler {
    services: Services,
}

impl InfoHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for InfoHandler {
    fn name(&self) -> &str {
        "info"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "info".to_string(),
            description: "Get one API element by exact name and kind. Names are \
                          case-insensitive and may be Russian or English."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Exact element name (e.g. 'НайтиПоСсылке', 'FindByRef')"
                    },
                    "kind": {
                        "type": "string",
                        "description": "Element kind",
                        "enum": ["method", "property", "type", "constructor"]
                    }
                },
                "required": ["name", "kind"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct InfoArgs {
            name: String,
            #[serde(alias = "type")]
            kind: String,
        }

        let args: InfoArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let kind = ApiType::from_string(&args.kind)
            .ok_or_else(|| McpError::InvalidParams(format!("Unknown kind: '{}'", args.kind)))?;

        let definition = self
            .services
            .search
            .info(&args.name, kind)
            .map_err(McpError::from)?;

        record_content(&definition)
    }
}
