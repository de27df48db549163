//! Error types and error handling for the wikisearch service.
//!
//! This module defines the error types used by the protocol-agnostic
//! core. Protocol-specific error handling (JSON-RPC codes, HTTP
//! status codes) lives in the respective adapter modules.

use thiserror::Error;

/// Result type alias for wikisearch operations
pub type Result<T> = std::result::Result<T, WikiSearchError>;

/// Main error type for the wikisearch service
#[derive(Error, Debug)]
pub enum WikiSearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Outline answered with a non-2xx status
    #[error("Request failed with status code {0}")]
    RequestFailed(u16),

    /// Outline answered 2xx but the body did not have the expected shape.
    /// The payload carries the validation detail for logs only.
    #[error("Invalid response structure from Outline API")]
    InvalidResponse(String),

    #[error("Timeout of {0}ms exceeded")]
    Timeout(u128),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl WikiSearchError {
    /// Check if the failure came from the outbound search call
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            WikiSearchError::RequestFailed(_)
                | WikiSearchError::InvalidResponse(_)
                | WikiSearchError::Timeout(_)
                | WikiSearchError::Http(_)
        )
    }
}
