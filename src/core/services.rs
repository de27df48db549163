//! Unified service container for wikisearch
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::search::{OutlineClient, SearchBackend};
use std::sync::Arc;

/// Unified services container
///
/// Scoped to the process lifetime and injected into every adapter.
#[derive(Clone)]
pub struct Services {
    /// Search backend used by the `search` tool
    pub search: Arc<dyn SearchBackend>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration, backed by the Outline API
    pub fn new(config: Config) -> Result<Self> {
        let client = OutlineClient::new(&config.outline)?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    /// Create services around an explicit search backend
    pub fn with_backend(config: Config, search: Arc<dyn SearchBackend>) -> Self {
        Self {
            search,
            config: Arc::new(config),
        }
    }
}
