//! History log trait: the durable, append-only message sequence.

use async_trait::async_trait;
use thiserror::Error;

use super::entity::ChatRecord;
use super::value_object::{MessageBody, Sequence, Timestamp, Username};

/// Errors raised by history log implementations.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history encoding error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("history log corrupt at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
}

/// Durable, append-only, totally ordered message log.
///
/// Sequence numbers are assigned by `append` under a single writer lock:
/// strictly increasing, gap-free, starting at 1. An append must be durably
/// persisted before it returns; a message that cannot be recorded must not
/// be broadcast.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryLog: Send + Sync {
    /// Append one message, assigning and returning its sequence.
    async fn append(
        &self,
        sender: Username,
        body: MessageBody,
        received_at: Timestamp,
    ) -> Result<Sequence, HistoryError>;

    /// Snapshot of the full history in append order.
    ///
    /// Reflects every append acknowledged before this call began; appends
    /// started afterwards may or may not be included.
    async fn replay(&self) -> Result<Vec<ChatRecord>, HistoryError>;
}
