//! Legacy HTTP+SSE transport endpoints
//!
//! GET /sse opens the event stream and announces the POST endpoint;
//! POST /messages?sessionId= carries client messages whose responses
//! are delivered on that stream.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures::{stream, StreamExt};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::http::error::HttpError;
use crate::http::handlers::{message_events, parse_message};
use crate::http::state::AppState;
use crate::mcp::session::SessionStore;
use crate::mcp::transport::{PendingTransport, SessionTransport, TransportKind};

/// Path announced to clients in the `endpoint` event
pub const MESSAGES_PATH: &str = "/messages";

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Closes and unregisters a legacy session when its stream is dropped
struct SessionGuard {
    transport: Arc<SessionTransport>,
    sessions: Arc<SessionStore>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let session_id = self.transport.session_id();
        self.transport.close();
        self.sessions.delete(session_id, TransportKind::Sse);
        info!(session_id = %session_id, "SSE session closed");
    }
}

/// GET /sse
pub async fn sse_handler(State(state): State<AppState>) -> Response {
    let pending = PendingTransport::allocate(TransportKind::Sse, state.tools.clone());
    let (transport, receiver) = pending.open();
    let session_id = transport.session_id().to_string();

    state
        .sessions
        .set(session_id.clone(), Arc::clone(&transport), TransportKind::Sse);
    info!(session_id = %session_id, "SSE session opened");

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{MESSAGES_PATH}?sessionId={session_id}"));

    let guard = SessionGuard {
        transport: Arc::clone(&transport),
        sessions: Arc::clone(&state.sessions),
    };

    let events = stream::once(async move { Ok(endpoint) })
        .chain(message_events(receiver.into_stream(), transport.closed_token()))
        .map(move |event| {
            let _guard = &guard;
            event
        });

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// POST /messages?sessionId=
pub async fn messages_handler(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> Result<Response, HttpError> {
    let transport = state
        .sessions
        .get(query.session_id.as_deref(), TransportKind::Sse)
        .ok_or(HttpError::UnknownSseSession)?;

    let message = parse_message(&body)?;

    if let Some(response) = transport.handle_message(message).await {
        if !transport.send(response).await {
            warn!(session_id = %transport.session_id(), "Response dropped, stream closed");
        }
    } else {
        debug!(session_id = %transport.session_id(), "Notification handled");
    }

    Ok((StatusCode::ACCEPTED, "Accepted").into_response())
}
