//! UseCase error types.

use thiserror::Error;

use crate::domain::HistoryError;

/// Errors raised by [`super::SendMessageUseCase`].
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// The message could not be durably recorded. It is not delivered to
    /// anyone in this case.
    #[error("message could not be durably recorded: {0}")]
    Persistence(#[from] HistoryError),
}
