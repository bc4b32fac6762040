//! Tool registry for discovery and dispatch.

use super::handler::McpToolHandler;
use crate::mcp::protocol::ToolSchema;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of all available MCP tools
pub struct ToolRegistry {
    handlers: HashMap<String, Arc<dyn McpToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn McpToolHandler>) {
        let name = handler.name().to_string();
        self.handlers.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpToolHandler>> {
        self.handlers.get(name)
    }

    /// All tool schemas, sorted by name for a stable listing.
    pub fn list(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> =
            self.handlers.values().map(|handler| handler.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::error::McpError;
    use crate::mcp::protocol::{ContentBlock, ToolResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct MockToolHandler {
        name: String,
    }

    #[async_trait]
    impl McpToolHandler for MockToolHandler {
        fn name(&self) -> &str {
            &self.name
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name.clone(),
                description: "Test tool".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            }
        }

        async fn execute(&self, _args: Value) -> Result<ToolResult, McpError> {
            Ok(ToolResult {
                content: vec![ContentBlock::Text {
                    text: "test result".to_string(),
                }],
            })
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(MockToolHandler {
            name: "test_tool".to_string(),
        }));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("test_tool"));
        assert_eq!(registry.get("test_tool").unwrap().name(), "test_tool");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_list_is_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(MockToolHandler {
            name: "zeta".to_string(),
        }));
        registry.register(Arc::new(MockToolHandler {
            name: "alpha".to_string(),
        }));

        let names: Vec<String> = registry.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
