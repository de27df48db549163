//! MCP (Model Context Protocol) module
//!
//! This module implements the JSON-RPC 2.0 side of the MCP server:
//! message types, per-session method dispatch, tools, and the
//! session-bound transports plus the registry that tracks them.
//! The HTTP surface that carries these messages lives in `http`.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod session;
pub mod tools;
pub mod transport;

// Re-export main types
pub use error::McpError;
pub use handlers::ProtocolHandlers;
pub use session::SessionStore;
pub use tools::{McpToolHandler, ToolRegistry};
pub use transport::{PendingTransport, SessionTransport, TransportKind};
