//! UseCase: leaving the chat (transport close, error or shutdown).

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// Removes a connection from the live set.
///
/// Safe to run at any point in the session: removal happens before any
/// later fan-out takes the registry lock, so a closed connection is never
/// written to again.
pub struct LeaveChatUseCase {
    /// Connection registry.
    pusher: Arc<dyn MessagePusher>,
}

impl LeaveChatUseCase {
    pub fn new(pusher: Arc<dyn MessagePusher>) -> Self {
        Self { pusher }
    }

    pub async fn execute(&self, connection_id: &ConnectionId) {
        self.pusher.unregister(connection_id).await;
        tracing::info!("Connection '{}' removed from registry", connection_id);
    }
}
