//! Message pusher trait: the registry of live outbound channels.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// Per-connection outbound channel carrying wire-format text lines.
///
/// Sends are non-blocking, so a stalled reader never stalls fan-out.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Errors raised by message push operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Registry of live connections and the fan-out over them.
///
/// Registration, removal and broadcast may run concurrently from
/// independent connection tasks; a connection removed during a broadcast is
/// either delivered to or cleanly skipped, never partially written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Add a connection's outbound channel to the live set.
    async fn register(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Remove a connection from the live set. Idempotent.
    async fn unregister(&self, connection_id: &ConnectionId);

    /// Push one line to a single connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Deliver one line to every currently live connection, the sender
    /// included. Dead channels are skipped with a warning.
    async fn broadcast_all(&self, content: &str);

    /// Number of currently live connections.
    async fn connected_count(&self) -> usize;
}
