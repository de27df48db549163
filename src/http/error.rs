//! HTTP adapter errors and their wire representation.

use crate::mcp::protocol::{JsonRpcResponse, INVALID_REQUEST, PARSE_ERROR, SERVER_ERROR};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use std::backtrace::Backtrace;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum HttpError {
    /// POST /mcp without a known session that is not an initialize request
    #[error("Bad Request: No valid session ID provided or not an initialization request.")]
    NoValidSession,

    /// GET or DELETE /mcp without a known session
    #[error("Invalid or missing session ID")]
    InvalidSession,

    /// POST /messages for an unknown legacy session
    #[error("No transport found for sessionId")]
    UnknownSseSession,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    /// Convert error to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::NoValidSession
            | HttpError::InvalidSession
            | HttpError::UnknownSseSession
            | HttpError::Parse(_)
            | HttpError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self {
            HttpError::NoValidSession => {
                (status, Json(JsonRpcResponse::error(None, SERVER_ERROR, message))).into_response()
            }
            HttpError::Parse(_) => {
                (status, Json(JsonRpcResponse::error(None, PARSE_ERROR, message))).into_response()
            }
            HttpError::InvalidRequest(_) => {
                (status, Json(JsonRpcResponse::error(None, INVALID_REQUEST, message)))
                    .into_response()
            }
            HttpError::InvalidSession | HttpError::UnknownSseSession => {
                (status, message).into_response()
            }
            HttpError::Internal(_) => (
                status,
                Json(json!({
                    "error": message,
                    "status": status.as_u16(),
                })),
            )
                .into_response(),
        }
    }
}

/// Turn a handler panic into a 500 carrying the message and a trace
///
/// The trace is captured in the recovering frame and is only
/// populated when `RUST_BACKTRACE` is enabled.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!(error = %message, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "stack": Backtrace::capture().to_string(),
        })),
    )
        .into_response()
}
