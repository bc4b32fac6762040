//! `get_constructors` tool handler.

use super::handler::{record_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::ConstructorsResponse;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct GetConstructorsHandler {
    services: Services,
}

impl GetConstructorsHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for GetConstructorsHandler {
    fn name(&self) -> &str {
        "get_constructors"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_constructors".to_string(),
            description: "List constructor signatures for creating instances of a \
                          platform type."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type_name": {
                        "type": "string",
                        "description": "Type name (e.g. 'Массив', 'Array')"
                    }
                },
                "required": ["type_name"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct GetConstructorsArgs {
            type_name: String,
        }

        let args: GetConstructorsArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let constructors = self
            .services
            .search
            .get_constructors(&args.type_name)
            .map_err(McpError::from)?;

        record_content(&ConstructorsResponse {
            type_name: args.type_name,
            count: constructors.len(),
            constructors,
        })
    }
}
