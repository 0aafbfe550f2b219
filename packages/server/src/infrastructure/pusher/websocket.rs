//! WebSocket-backed message pusher.
//!
//! Holds the registry of live connections: one `UnboundedSender` per open
//! socket, keyed by connection id. WebSocket creation happens in the UI
//! layer; this implementation only manages the senders and performs the
//! fan-out over them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// Registry of live connections and WebSocket fan-out.
pub struct WebSocketMessagePusher {
    /// Live connections.
    ///
    /// Key: connection id
    /// Value: outbound channel feeding that connection's socket writer task
    connections: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id.clone(), sender);
        tracing::debug!("Connection '{}' registered", connection_id);
    }

    async fn unregister(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        if let Some(sender) = connections.get(connection_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            Ok(())
        } else {
            Err(MessagePushError::ConnectionNotFound(
                connection_id.to_string(),
            ))
        }
    }

    async fn broadcast_all(&self, content: &str) {
        // Membership is decided by this lock: a connection registered
        // before the lock is taken receives the in-flight line.
        let connections = self.connections.lock().await;

        for (connection_id, sender) in connections.iter() {
            // A connection mid-removal has a closed channel; skip it
            // cleanly rather than failing the whole broadcast.
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!("Failed to push to connection '{}': {}", connection_id, e);
            }
        }
    }

    async fn connected_count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
