//! `get_members` tool handler.

use super::handler::{record_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::MembersResponse;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct GetMembersHandler {
    services: Services,
}

impl GetMembersHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for GetMembersHandler {
    fn name(&self) -> &str {
        "get_members"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_members".to_string(),
            description: "List all methods and properties of a platform type."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type_name": {
                        "type": "string",
                        "description": "Type name (e.g. 'ТаблицаЗначений', 'ValueTable')"
                    }
                },
                "required": ["type_name"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct GetMembersArgs {
            type_name: String,
        }

        let args: GetMembersArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let members = self
            .services
            .search
            .get_members(&args.type_name)
            .map_err(McpError::from)?;

        record_content(&MembersResponse {
            type_name: args.type_name,
            count: members.len(),
            members,
        })
    }
}
