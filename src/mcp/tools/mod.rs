//! MCP tool implementations
//!
//! This module contains the tool handlers exposed to MCP clients.

pub mod handler;
pub mod registry;
pub mod search;

pub use handler::{text_content, McpToolHandler};
pub use registry::ToolRegistry;
pub use search::{format_results, SearchToolHandler, SEARCH_TOOL_NAME};
