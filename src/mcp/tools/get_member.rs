//! `get_member` tool handler.

use super::handler::{record_content, McpToolHandler};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct GetMemberHandler {
    services: Services,
}

impl GetMemberHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for GetMemberHandler {
    fn name(&self) -> &str {
        "get_member"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_member".to_string(),
            description: "Get a method or property of a specific platform type."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type_name": {
                        "type": "string",
                        "description": "Type name (e.g. 'ТаблицаЗначений', 'ValueTable')"
                    },
                    "member_name": {
                        "type": "string",
                        "description": "Method or property name within the type"
                    }
                },
                "required": ["type_name", "member_name"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct GetMemberArgs {
            type_name: String,
            member_name: String,
        }

        let args: GetMemberArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let member = self
            .services
            .search
            .get_member(&args.type_name, &args.member_name)
            .map_err(McpError::from)?;

        record_content(&member)
    }
}
