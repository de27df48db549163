//! Domain data structures
//!
//! Wire types for the Outline `documents.search` call plus the small
//! response types served by the HTTP adapter.

use crate::core::error::{Result, WikiSearchError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page offset sent with every search; only the first page is requested
pub const SEARCH_OFFSET: usize = 0;

/// Outbound search request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search term the caller typed
    pub query: String,
    /// Page size
    pub limit: usize,
    /// Pagination offset
    pub offset: usize,
}

impl SearchRequest {
    /// Build a first-page request
    ///
    /// # Errors
    ///
    /// `InvalidQuery` when the query is empty or whitespace only.
    pub fn new(query: impl Into<String>, limit: usize) -> Result<Self> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(WikiSearchError::InvalidQuery(
                "search query cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            query,
            limit,
            offset: SEARCH_OFFSET,
        })
    }
}

/// A single ranked hit returned by Outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub ranking: f64,

    /// Highlighted snippet around the match
    #[serde(default)]
    pub context: String,

    pub document: Document,
}

/// Document record nested in a search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub url: String,

    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

/// Pagination block of a search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub limit: usize,

    #[serde(default)]
    pub offset: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Validated body of a `documents.search` response
///
/// Unknown top-level fields (`policies`, `status`, `ok`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<SearchResult>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
