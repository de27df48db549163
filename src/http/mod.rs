//! HTTP adapter
//!
//! Serves MCP over Streamable HTTP (`/mcp`) and the legacy HTTP+SSE
//! transport (`/sse`, `/messages`) via the Axum web framework.
//! Protocol handling lives in mcp/; this module only moves messages
//! between HTTP and session transports.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod sse;
pub mod state;
pub mod streamable;

/// Header carrying the streamable session id
pub const SESSION_ID_HEADER: &str = "mcp-session-id";

pub use error::HttpError;
pub use router::router;
pub use state::AppState;
