//! MCP tool implementations exposing the context service.

pub mod get_constructors;
pub mod get_member;
pub mod get_members;
pub mod handler;
pub mod info;
pub mod registry;
pub mod search;

pub use get_constructors::GetConstructorsHandler;
pub use get_member::GetMemberHandler;
pub use get_members::GetMembersHandler;
pub use handler::{record_content, McpToolHandler};
pub use info::InfoHandler;
pub use registry::ToolRegistry;
pub use search::SearchHandler;
