//! Streamable HTTP transport endpoints (`/mcp`)
//!
//! POST carries client messages and answers inline. GET opens a
//! server-to-client event stream for an existing session. DELETE ends
//! the session.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{
        sse::{KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use tracing::{debug, info};

use crate::http::error::HttpError;
use crate::http::handlers::{decode_message, message_events, parse_json};
use crate::http::state::AppState;
use crate::http::SESSION_ID_HEADER;
use crate::mcp::protocol::JsonRpcRequest;
use crate::mcp::transport::{PendingTransport, TransportKind};

/// Read the session id header, treating an empty value as absent
pub fn session_id_from(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// POST /mcp
///
/// Routes to the session's transport when the header names a known
/// session. Otherwise only an initialize request is accepted, which
/// creates and registers a new session.
pub async fn post_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HttpError> {
    let value = parse_json(&body)?;

    if let Some(transport) = state
        .sessions
        .get(session_id_from(&headers), TransportKind::Streamable)
    {
        let message = decode_message(value)?;
        debug!(session_id = %transport.session_id(), "Routing message to session");
        return Ok(match transport.handle_message(message).await {
            Some(response) => Json(response).into_response(),
            None => StatusCode::ACCEPTED.into_response(),
        });
    }

    // Without a session only a well-formed initialize request is accepted
    let request = match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) if request.is_initialize() => request,
        _ => return Err(HttpError::NoValidSession),
    };

    let pending = PendingTransport::allocate(TransportKind::Streamable, state.tools.clone());
    let (transport, response) = match pending.initialize(request).await {
        Ok(initialized) => initialized,
        Err(response) => return Ok((StatusCode::BAD_REQUEST, Json(response)).into_response()),
    };

    let session_id = transport.session_id().to_string();
    let header_value =
        HeaderValue::from_str(&session_id).map_err(|e| HttpError::Internal(e.to_string()))?;

    state
        .sessions
        .set(session_id.clone(), transport, TransportKind::Streamable);
    info!(session_id = %session_id, "Streamable session initialized");

    let mut response = Json(response).into_response();
    response.headers_mut().insert(SESSION_ID_HEADER, header_value);
    Ok(response)
}

/// GET /mcp
///
/// Opens an event stream carrying server-initiated messages.
pub async fn get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let transport = state
        .sessions
        .get(session_id_from(&headers), TransportKind::Streamable)
        .ok_or(HttpError::InvalidSession)?;

    let receiver = transport.subscribe().ok_or(HttpError::InvalidSession)?;
    debug!(session_id = %transport.session_id(), "Event stream opened");

    let events = message_events(receiver.into_stream(), transport.closed_token());
    Ok(Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response())
}

/// DELETE /mcp
///
/// Closes the session and removes it from the registry.
pub async fn delete_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let session_id = session_id_from(&headers).ok_or(HttpError::InvalidSession)?;
    let transport = state
        .sessions
        .delete(session_id, TransportKind::Streamable)
        .ok_or(HttpError::InvalidSession)?;

    transport.close();
    info!(session_id = %session_id, "Streamable session terminated");

    Ok(StatusCode::OK.into_response())
}
