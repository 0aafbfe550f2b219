//! Chat record entity.

use serde::{Deserialize, Serialize};

use super::value_object::{MessageBody, Sequence, Timestamp, Username};

/// One delivered message, immutable once created.
///
/// Records are created only by the broadcast engine after a successful
/// append to the history log; they are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Position in the global message order.
    pub sequence: Sequence,
    /// Display name of the sender at the time of delivery.
    pub sender: Username,
    /// Message body.
    pub body: MessageBody,
    /// Arrival time at the broadcast engine (UTC milliseconds).
    pub received_at: Timestamp,
}

impl ChatRecord {
    pub fn new(
        sequence: Sequence,
        sender: Username,
        body: MessageBody,
        received_at: Timestamp,
    ) -> Self {
        Self {
            sequence,
            sender,
            body,
            received_at,
        }
    }

    /// Render the wire representation delivered to clients.
    ///
    /// History replay and live fan-out must produce the same string so the
    /// two concatenate into one coherent timeline.
    pub fn wire_line(&self) -> String {
        format!("{}: {}", self.sender.as_str(), self.body.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(sender: &str, body: &str) -> ChatRecord {
        ChatRecord::new(
            Sequence::FIRST,
            Username::new(sender.to_string()).unwrap(),
            MessageBody::new(body.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_wire_line_format() {
        // テスト項目: ワイヤ表現が "<username>: <message>" 形式になる
        // given (前提条件):
        let record = create_test_record("alice", "hi");

        // when (操作):
        let line = record.wire_line();

        // then (期待する結果):
        assert_eq!(line, "alice: hi");
    }

    #[test]
    fn test_wire_line_keeps_colons_in_body() {
        // テスト項目: 本文にコロンが含まれていてもそのまま保持される
        // given (前提条件):
        let record = create_test_record("bob", "note: see you at 10:30");

        // when (操作):
        let line = record.wire_line();

        // then (期待する結果):
        assert_eq!(line, "bob: note: see you at 10:30");
    }

    #[test]
    fn test_record_round_trips_through_json() {
        // テスト項目: レコードが JSON を介して等価に復元される
        // given (前提条件):
        let record = create_test_record("alice", "hello");

        // when (操作):
        let json = serde_json::to_string(&record).unwrap();
        let restored: ChatRecord = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(restored, record);
    }
}
