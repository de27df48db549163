//! Shared HTTP handlers and helpers
//!
//! Health check plus the body parsing and event stream plumbing used
//! by both the streamable and legacy SSE endpoints.

use std::convert::Infallible;

use axum::{
    response::{sse::Event, IntoResponse},
    Json,
};
use futures::{Stream, StreamExt};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::core::types::HealthResponse;
use crate::http::error::HttpError;
use crate::mcp::protocol::{JsonRpcMessage, JsonRpcResponse};

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Parse a request body as JSON, failing with `Parse` otherwise
pub fn parse_json(body: &[u8]) -> Result<Value, HttpError> {
    serde_json::from_slice(body).map_err(|e| HttpError::Parse(e.to_string()))
}

/// Decode parsed JSON into a JSON-RPC message
///
/// Fails with `InvalidRequest` for anything that is not a single
/// request, notification or response (batches included).
pub fn decode_message(value: Value) -> Result<JsonRpcMessage, HttpError> {
    serde_json::from_value(value).map_err(|e| HttpError::InvalidRequest(e.to_string()))
}

/// Parse a request body into a JSON-RPC message
///
/// # Errors
///
/// - `Parse`: body is not JSON
/// - `InvalidRequest`: body is JSON but not a JSON-RPC message
pub fn parse_message(body: &[u8]) -> Result<JsonRpcMessage, HttpError> {
    decode_message(parse_json(body)?)
}

/// Turn a session's outbound messages into `message` events
///
/// The stream ends when `closed` is cancelled.
pub fn message_events<S>(
    messages: S,
    closed: CancellationToken,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static
where
    S: Stream<Item = JsonRpcResponse> + Send + 'static,
{
    messages
        .filter_map(|message| async move {
            match Event::default().event("message").json_data(&message) {
                Ok(event) => Some(Ok(event)),
                Err(e) => {
                    warn!("Failed to encode event: {}", e);
                    None
                }
            }
        })
        .take_until(closed.cancelled_owned())
}
