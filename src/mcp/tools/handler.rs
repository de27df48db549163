//! The seam between `tools/call` and the wiki-backed tools

use crate::mcp::error::McpError;
use crate::mcp::protocol::{ContentBlock, ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::Value;

/// A tool exposed through `tools/list` and `tools/call`
///
/// `Err` from `execute` is reported as a JSON-RPC error. A wiki that is
/// down or answers badly is not a protocol failure, so tools turn those
/// into a text result the model can read.
#[async_trait]
pub trait McpToolHandler: Send + Sync {
    /// Registry key, matched against `params.name`
    fn name(&self) -> &str;

    fn schema(&self) -> ToolSchema;

    /// Run with the raw `arguments` object (null when omitted)
    async fn execute(&self, args: Value) -> Result<ToolResult, McpError>;
}

/// Single text block result
pub fn text_content(text: impl Into<String>) -> ToolResult {
    ToolResult {
        content: vec![ContentBlock::Text { text: text.into() }],
    }
}
