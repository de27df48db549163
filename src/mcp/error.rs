//! MCP-specific error types

use crate::core::error::WikiSearchError;
use crate::mcp::protocol::{INTERNAL_ERROR, INVALID_PARAMS};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i32 {
        match self {
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) | McpError::Json(_) => INTERNAL_ERROR,
        }
    }
}

impl From<WikiSearchError> for McpError {
    fn from(err: WikiSearchError) -> Self {
        match err {
            WikiSearchError::InvalidQuery(_) => McpError::InvalidParams(err.to_string()),
            other => McpError::InternalError(other.to_string()),
        }
    }
}
