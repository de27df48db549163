//! Application state for the HTTP adapter
//!
//! Provides shared state across all request handlers: the tool registry
//! every session dispatches to, and the session registry.

use std::sync::Arc;

use crate::core::services::Services;
use crate::mcp::session::SessionStore;
use crate::mcp::tools::ToolRegistry;

/// Shared application state for Axum handlers
///
/// All fields are wrapped in Arc for sharing across async tasks; the
/// state is created once at startup and lives for the whole process.
#[derive(Clone)]
pub struct AppState {
    /// Tools exposed to every session
    pub tools: Arc<ToolRegistry>,

    /// Live sessions for both transport kinds
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Build the tool registry from services and start with no sessions
    pub fn new(services: &Services) -> Self {
        Self {
            tools: Arc::new(ToolRegistry::with_default_tools(services)),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}
