//! UseCase: message submission and broadcast (the broadcast engine).
//!
//! Accepts an inbound message from a joined connection, appends it to the
//! history log (assigning its place in the global order) and fans the wire
//! line out to every live connection, the sender included.

use std::sync::Arc;

use tokio::sync::Mutex;

use sohbet_shared::time::get_utc_timestamp;

use crate::domain::{
    ChatRecord, HistoryLog, MessageBody, MessagePusher, Sequence, Timestamp, Username,
};

use super::error::SendMessageError;

/// The broadcast engine. Holds no persistent state itself; it coordinates
/// the history log and the connection registry.
pub struct SendMessageUseCase {
    /// History log (durable total order).
    history: Arc<dyn HistoryLog>,
    /// Connection registry and fan-out.
    pusher: Arc<dyn MessagePusher>,
    /// Serializes append + fan-out so that delivery order over every
    /// channel equals append order. Without this, two submissions could
    /// append as 1,2 but fan out as 2,1.
    order: Mutex<()>,
}

impl SendMessageUseCase {
    pub fn new(history: Arc<dyn HistoryLog>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            history,
            pusher,
            order: Mutex::new(()),
        }
    }

    /// Persist and broadcast one message.
    ///
    /// # Arguments
    ///
    /// * `sender` - Display name bound to the submitting connection
    /// * `body` - Validated message body
    ///
    /// # Returns
    ///
    /// * `Ok((Sequence, String))` - assigned sequence and the wire line
    ///   that was fanned out
    /// * `Err(SendMessageError)` - the append failed; nothing was delivered
    pub async fn execute(
        &self,
        sender: Username,
        body: MessageBody,
    ) -> Result<(Sequence, String), SendMessageError> {
        let _order = self.order.lock().await;

        let received_at = Timestamp::new(get_utc_timestamp());

        // 1. Durably record the message first. A message that cannot be
        //    recorded must not be broadcast.
        let sequence = self
            .history
            .append(sender.clone(), body.clone(), received_at)
            .await?;

        // 2. Render the wire representation.
        let line = ChatRecord::new(sequence, sender, body, received_at).wire_line();

        // 3. Fan out to every live connection, sender included. Individual
        //    channel failures are skipped inside the pusher.
        self.pusher.broadcast_all(&line).await;

        tracing::info!("Broadcast sequence {}: {}", sequence.value(), line);
        Ok((sequence, line))
    }
}
