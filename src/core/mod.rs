//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, MCP, etc).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Outline wire types
//! - **search**: Outline search client and response validation
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod search;
pub mod services;
pub mod types;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, WikiSearchError};
pub use services::Services;
