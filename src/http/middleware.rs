//! Access logging for the MCP endpoints

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};

use super::SESSION_ID_HEADER;

/// Session a request belongs to, from the `mcp-session-id` header or
/// the legacy `sessionId` query parameter
fn request_session(request: &Request<Body>) -> Option<String> {
    if let Some(value) = request
        .headers()
        .get(SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        return Some(value.to_string());
    }

    request.uri().query().and_then(|query| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, value)| *key == "sessionId" && !value.is_empty())
            .map(|(_, value)| value.to_string())
    })
}

/// Log one line per request with its session and timing
///
/// Session mistakes by clients (unknown id, missing initialize) are
/// 4xx and logged at WARN; ERROR is kept for 5xx. Event streams are
/// logged once their headers go out, not when they close.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let session = request_session(&request).unwrap_or_else(|| "-".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            session = %session,
            status = %status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    } else if status.is_client_error() {
        warn!(
            method = %method,
            path = %path,
            session = %session,
            status = %status.as_u16(),
            duration_ms = %duration_ms,
            "Request rejected"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            session = %session,
            status = %status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    response
}
