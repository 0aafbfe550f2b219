//! UseCase: serving the full persisted history.
//!
//! Produces the same `"<username>: <message>"` lines the live fan-out
//! delivers, so history + live stream concatenate into one timeline
//! without duplication or gaps.

use std::sync::Arc;

use crate::domain::{HistoryError, HistoryLog};

/// Renders the durable history for a joining client.
pub struct ReplayHistoryUseCase {
    /// History log.
    history: Arc<dyn HistoryLog>,
}

impl ReplayHistoryUseCase {
    pub fn new(history: Arc<dyn HistoryLog>) -> Self {
        Self { history }
    }

    /// Full history as wire lines, oldest first.
    pub async fn execute(&self) -> Result<Vec<String>, HistoryError> {
        let records = self.history.replay().await?;
        Ok(records.iter().map(|r| r.wire_line()).collect())
    }
}
