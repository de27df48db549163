//! Session-bound transports for MCP over HTTP
//!
//! A transport ties one session id to its protocol state and to the
//! channel feeding the session's event stream. Transports are created
//! in two phases: [`PendingTransport::allocate`] reserves an id, then
//! [`PendingTransport::initialize`] (streamable) or
//! [`PendingTransport::open`] (legacy SSE) promotes it to a live
//! [`SessionTransport`] that the caller registers.

use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::{JsonRpcMessage, JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST};
use crate::mcp::tools::ToolRegistry;
use futures::stream::{BoxStream, StreamExt};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream, ReceiverStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

/// Buffered outbound messages per session event stream
const OUTBOUND_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Streamable HTTP (`/mcp`)
    Streamable,
    /// Legacy HTTP+SSE (`/sse` + `/messages`)
    Sse,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Streamable => write!(f, "streamable"),
            TransportKind::Sse => write!(f, "sse"),
        }
    }
}

/// Sending side of a session's event stream
enum Outbound {
    /// Fan-out to every attached `GET /mcp` stream; slow readers skip ahead
    Broadcast(broadcast::Sender<JsonRpcResponse>),
    /// The single legacy stream; senders wait for room
    Queue(mpsc::Sender<JsonRpcResponse>),
}

/// Receiving side of a session's event stream
pub enum OutboundReceiver {
    Broadcast(broadcast::Receiver<JsonRpcResponse>),
    Queue(mpsc::Receiver<JsonRpcResponse>),
}

impl OutboundReceiver {
    /// Messages in send order
    pub fn into_stream(self) -> BoxStream<'static, JsonRpcResponse> {
        match self {
            OutboundReceiver::Broadcast(receiver) => BroadcastStream::new(receiver)
                .filter_map(|item| async move {
                    match item {
                        Ok(message) => Some(message),
                        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                            warn!("Event stream lagged, {} message(s) dropped", skipped);
                            None
                        }
                    }
                })
                .boxed(),
            OutboundReceiver::Queue(receiver) => ReceiverStream::new(receiver).boxed(),
        }
    }
}

/// Live transport for one client session
pub struct SessionTransport {
    session_id: String,
    kind: TransportKind,
    handlers: ProtocolHandlers,
    outbound: Outbound,
    closed: CancellationToken,
}

impl SessionTransport {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn is_initialized(&self) -> bool {
        self.handlers.is_initialized()
    }

    /// Process one inbound message through this session's handlers
    pub async fn handle_message(&self, message: JsonRpcMessage) -> Option<JsonRpcResponse> {
        self.handlers.handle_message(message).await
    }

    /// Push a message onto the session's event stream
    ///
    /// Legacy sessions wait until the stream has room, so no reply is
    /// lost to a slow reader. Returns false when no stream is attached
    /// or the session closed before delivery.
    pub async fn send(&self, message: JsonRpcResponse) -> bool {
        let delivered = match &self.outbound {
            Outbound::Broadcast(sender) => sender.send(message).is_ok(),
            Outbound::Queue(sender) => tokio::select! {
                result = sender.send(message) => result.is_ok(),
                _ = self.closed.cancelled() => false,
            },
        };

        if !delivered {
            debug!(session_id = %self.session_id, "No open stream; message dropped");
        }
        delivered
    }

    /// Attach another reader to a streamable session's event stream
    ///
    /// Legacy sessions have exactly one reader, handed out by
    /// [`PendingTransport::open`], so this returns `None` for them.
    pub fn subscribe(&self) -> Option<OutboundReceiver> {
        match &self.outbound {
            Outbound::Broadcast(sender) => Some(OutboundReceiver::Broadcast(sender.subscribe())),
            Outbound::Queue(_) => None,
        }
    }

    /// Token cancelled when the transport closes
    pub fn closed_token(&self) -> CancellationToken {
        self.closed.clone()
    }

    pub fn close(&self) {
        self.closed.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }
}

impl fmt::Debug for SessionTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTransport")
            .field("session_id", &self.session_id)
            .field("kind", &self.kind)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Transport with a reserved session id that is not yet registered
pub struct PendingTransport {
    inner: SessionTransport,
    receiver: OutboundReceiver,
}

impl PendingTransport {
    /// Reserve a fresh session id and protocol state
    pub fn allocate(kind: TransportKind, tools: Arc<ToolRegistry>) -> Self {
        let (outbound, receiver) = match kind {
            TransportKind::Streamable => {
                let (sender, receiver) = broadcast::channel(OUTBOUND_CAPACITY);
                (Outbound::Broadcast(sender), OutboundReceiver::Broadcast(receiver))
            }
            TransportKind::Sse => {
                let (sender, receiver) = mpsc::channel(OUTBOUND_CAPACITY);
                (Outbound::Queue(sender), OutboundReceiver::Queue(receiver))
            }
        };

        Self {
            inner: SessionTransport {
                session_id: Uuid::new_v4().to_string(),
                kind,
                handlers: ProtocolHandlers::new(tools),
                outbound,
                closed: CancellationToken::new(),
            },
            receiver,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.inner.session_id
    }

    /// Run the initialize request and promote on success
    ///
    /// On failure the pending transport is discarded and the error
    /// response is returned for the caller to send back. Streams are
    /// attached later through [`SessionTransport::subscribe`].
    pub async fn initialize(
        self,
        request: JsonRpcRequest,
    ) -> Result<(Arc<SessionTransport>, JsonRpcResponse), JsonRpcResponse> {
        match self.inner.handlers.dispatch(request).await {
            Some(response) if !response.is_error() => Ok((Arc::new(self.inner), response)),
            Some(response) => Err(response),
            None => Err(JsonRpcResponse::error(
                None,
                INVALID_REQUEST,
                "Initialize must be a request",
            )),
        }
    }

    /// Promote once the event stream is established
    ///
    /// The returned receiver exists before the transport becomes
    /// reachable, so no message posted to the session can be missed.
    pub fn open(self) -> (Arc<SessionTransport>, OutboundReceiver) {
        (Arc::new(self.inner), self.receiver)
    }
}
