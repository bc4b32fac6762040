//! `search` tool handler.

use super::handler::{record_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::{ApiType, SearchResponse};
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct SearchHandler {
    services: Services,
}

impl SearchHandler {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for SearchHandler {
    fn name(&self) -> &str {
        "search"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search".to_string(),
            description: "Search the 1C platform API reference: methods, properties, \
                          types and constructors, in Russian or English. Handles exact \
                          names ('НайтиПоСсылке', 'FindByRef'), prefixes, two-word \
                          compound type names ('Справочник Объект') and \
                          'Type.Member' patterns ('ТаблицаЗначений.Добавить')."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search term, Russian or English",
                        "minLength": 1
                    },
                    "kind": {
                        "type": "string",
                        "description": "Filter by element kind",
                        "enum": ["method", "property", "type", "constructor"]
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum results to return (default 50)",
                        "minimum": 1,
                        "maximum": 50
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct SearchArgs {
            query: String,
            #[serde(alias = "type")]
            kind: Option<String>,
            limit: Option<i64>,
        }

        let args: SearchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let kind = match &args.kind {
            None => None,
            Some(raw) => Some(ApiType::from_string(raw).ok_or_else(|| {
                McpError::InvalidParams(format!("Unknown kind: '{raw}'"))
            })?),
        };

        let results = self
            .services
            .search
            .search(&args.query, kind, args.limit)
            .map_err(McpError::from)?;

        record_content(&SearchResponse {
            query: args.query,
            count: results.len(),
            results,
        })
    }
}
