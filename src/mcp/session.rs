//! Session registry
//!
//! Maps session ids to live transports, partitioned by transport
//! kind. One store is created per process and shared by reference
//! with every request handler.

use crate::mcp::transport::{SessionTransport, TransportKind};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::info;

#[derive(Default)]
pub struct SessionStore {
    streamable: DashMap<String, Arc<SessionTransport>>,
    sse: DashMap<String, Arc<SessionTransport>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn partition(&self, kind: TransportKind) -> &DashMap<String, Arc<SessionTransport>> {
        match kind {
            TransportKind::Streamable => &self.streamable,
            TransportKind::Sse => &self.sse,
        }
    }

    /// Look up a transport; a missing id is always absent
    pub fn get(&self, session_id: Option<&str>, kind: TransportKind) -> Option<Arc<SessionTransport>> {
        let session_id = session_id?;
        self.partition(kind)
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Register a transport, replacing any previous one (last write wins)
    pub fn set(
        &self,
        session_id: impl Into<String>,
        transport: Arc<SessionTransport>,
        kind: TransportKind,
    ) -> Option<Arc<SessionTransport>> {
        self.partition(kind).insert(session_id.into(), transport)
    }

    /// Remove a transport, returning it if it was registered
    pub fn delete(&self, session_id: &str, kind: TransportKind) -> Option<Arc<SessionTransport>> {
        self.partition(kind)
            .remove(session_id)
            .map(|(_, transport)| transport)
    }

    pub fn contains(&self, session_id: &str, kind: TransportKind) -> bool {
        self.partition(kind).contains_key(session_id)
    }

    pub fn len(&self, kind: TransportKind) -> usize {
        self.partition(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.streamable.is_empty() && self.sse.is_empty()
    }

    /// Close and drop every session (used on shutdown)
    pub fn close_all(&self) {
        for kind in [TransportKind::Streamable, TransportKind::Sse] {
            let partition = self.partition(kind);
            let count = partition.len();
            for entry in partition.iter() {
                entry.value().close();
            }
            partition.clear();
            if count > 0 {
                info!("Closed {} {} session(s)", count, kind);
            }
        }
    }
}
