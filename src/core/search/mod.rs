//! Search module for the Outline document store.
//!
//! This module provides the outbound search client and the boundary
//! validation of the responses it receives.

mod outline;
mod response;

pub use outline::{OutlineClient, DEFAULT_TIMEOUT, SEARCH_PATH};
pub use response::ResponseShape;

use crate::core::error::Result;
use crate::core::types::{SearchRequest, SearchResult};
use async_trait::async_trait;

/// A document search backend
///
/// Implemented by [`OutlineClient`]; tool handlers depend on the trait
/// so they can be exercised without network access.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search and return the hits in backend ranking order
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;
}
