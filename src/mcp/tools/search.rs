//! Search tool handler

use super::handler::{text_content, McpToolHandler};
use crate::core::search::SearchBackend;
use crate::core::types::{SearchRequest, SearchResult};
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const SEARCH_TOOL_NAME: &str = "search";

pub struct SearchToolHandler {
    backend: Arc<dyn SearchBackend>,
    limit: usize,
}

impl SearchToolHandler {
    pub fn new(backend: Arc<dyn SearchBackend>, limit: usize) -> Self {
        Self { backend, limit }
    }
}

/// Render search hits as numbered Markdown blocks, in backend order
pub fn format_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No results found for query: \"{query}\"");
    }

    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let document = &result.document;
            format!(
                "{}. **{}**\n   URL: {}\n   Text: {}",
                i + 1,
                document.title,
                document.url,
                document.text
            )
        })
        .collect();

    format!(
        "Found {} results for \"{}\":\n\n{}",
        results.len(),
        query,
        blocks.join("\n\n")
    )
}

#[async_trait]
impl McpToolHandler for SearchToolHandler {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: SEARCH_TOOL_NAME.to_string(),
            title: Some("Search".to_string()),
            description: "Search for content using search string. Use it to find information \
                          in your wiki through elasticsearch search string. Example query: \
                          'free tier'. Use a comma to search for multiple terms. Example query: \
                          'free tier, AI'"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Search query. Separate multiple terms with commas."
                    }
                },
                "required": ["query"],
                "additionalProperties": false
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        #[derive(Deserialize)]
        struct SearchArgs {
            query: String,
        }

        let args: SearchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let request = SearchRequest::new(args.query, self.limit)?;

        // Backend failures are reported to the caller as text, never as
        // a JSON-RPC error
        match self.backend.search(&request).await {
            Ok(results) => {
                info!(query = %request.query, results = results.len(), "Search completed");
                Ok(text_content(format_results(&request.query, &results)))
            }
            Err(e) => {
                if e.is_upstream() {
                    warn!(query = %request.query, error = %e, "Outline search failed");
                } else {
                    error!(query = %request.query, error = %e, "Search failed");
                }
                Ok(text_content(format!("Search failed: {e}")))
            }
        }
    }
}
