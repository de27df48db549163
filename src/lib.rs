//! wikisearch - MCP search server for an Outline wiki
//!
//! Exposes a single `search` tool to MCP clients and answers it by
//! querying Outline's `documents.search` endpoint.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types
//!   - search (Outline client, response validation)
//!   - services (unified service container)
//!
//! - **mcp**: JSON-RPC side of MCP (depends on core)
//!   - protocol, handlers, tools
//!   - transport, session (per-client state and registry)
//!
//! - **http**: Axum adapter (depends on core and mcp)
//!   - Streamable HTTP (`/mcp`)
//!   - legacy HTTP+SSE (`/sse`, `/messages`)
//!
//! # Key Features
//!
//! - Both MCP HTTP transports served from one process
//! - Sessions isolated per client, tracked in a concurrent registry
//! - Upstream failures reported as tool text, never as HTTP errors
//! - Outbound proxy support via standard proxy variables

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP transport adapter
pub mod http;

// MCP (Model Context Protocol) adapter
pub mod mcp;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{Result, WikiSearchError};
pub use core::services::Services;
pub use core::types::*;
