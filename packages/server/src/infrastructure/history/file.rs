//! File-backed history log.
//!
//! One JSON record per line, append-only. The full log is loaded into an
//! in-memory mirror at startup so `replay` is a cheap snapshot; every
//! `append` is written and fsync'd before the assigned sequence is
//! returned, which makes the log survive process restarts without ever
//! exposing an unpersisted message to the fan-out.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatRecord, HistoryError, HistoryLog, MessageBody, Sequence, Timestamp, Username,
};

struct LogInner {
    writer: File,
    /// In-memory mirror of the persisted records, in append order.
    records: Vec<ChatRecord>,
    /// Sequence to assign to the next append.
    next_sequence: Sequence,
}

/// Append-only JSON-lines history log on the local filesystem.
pub struct FileHistoryLog {
    inner: Mutex<LogInner>,
}

impl FileHistoryLog {
    /// Open the log at `path`, creating it if missing, and load the
    /// existing records.
    ///
    /// A torn final line (an append interrupted by a crash before the
    /// newline made it to disk) is dropped with a warning; an unparsable
    /// line anywhere else is reported as corruption.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let records = Self::load_records(&path)?;
        let next_sequence = records
            .last()
            .map(|r| r.sequence.next())
            .unwrap_or(Sequence::FIRST);

        let writer = OpenOptions::new().create(true).append(true).open(&path)?;

        tracing::info!(
            "History log opened at {} ({} records, next sequence {})",
            path.display(),
            records.len(),
            next_sequence.value()
        );

        Ok(Self {
            inner: Mutex::new(LogInner {
                writer,
                records,
                next_sequence,
            }),
        })
    }

    fn load_records(path: &Path) -> Result<Vec<ChatRecord>, HistoryError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
        let line_count = lines.len();

        let mut records = Vec::with_capacity(line_count);
        for (index, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ChatRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) if index + 1 == line_count => {
                    // Torn tail from an interrupted append. The record was
                    // never acknowledged, so dropping it is safe.
                    tracing::warn!(
                        "Dropping torn final line of history log {}: {}",
                        path.display(),
                        e
                    );
                }
                Err(e) => {
                    return Err(HistoryError::Corrupt {
                        line: index + 1,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl HistoryLog for FileHistoryLog {
    async fn append(
        &self,
        sender: Username,
        body: MessageBody,
        received_at: Timestamp,
    ) -> Result<Sequence, HistoryError> {
        let mut inner = self.inner.lock().await;

        let sequence = inner.next_sequence;
        let record = ChatRecord::new(sequence, sender, body, received_at);

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        inner.writer.write_all(line.as_bytes())?;
        // Durability before acknowledgement: the sequence is only handed
        // out once the record has reached the disk.
        inner.writer.sync_data()?;

        inner.records.push(record);
        inner.next_sequence = sequence.next();

        tracing::debug!("Appended history record with sequence {}", sequence.value());
        Ok(sequence)
    }

    async fn replay(&self) -> Result<Vec<ChatRecord>, HistoryError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_path() -> PathBuf {
        std::env::temp_dir().join(format!("sohbet-history-{}.jsonl", uuid::Uuid::new_v4()))
    }

    fn username(value: &str) -> Username {
        Username::new(value.to_string()).unwrap()
    }

    fn body(value: &str) -> MessageBody {
        MessageBody::new(value.to_string()).unwrap()
    }

    struct TempLog(PathBuf);

    impl Drop for TempLog {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[tokio::test]
    async fn test_append_assigns_strictly_increasing_sequences() {
        // テスト項目: append が厳密に増加するシーケンスを割り当てる
        // given (前提条件):
        let path = temp_log_path();
        let _guard = TempLog(path.clone());
        let log = FileHistoryLog::open(&path).unwrap();

        // when (操作):
        let seq1 = log
            .append(username("alice"), body("first"), Timestamp::new(1))
            .await
            .unwrap();
        let seq2 = log
            .append(username("bob"), body("second"), Timestamp::new(2))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(seq1, Sequence::FIRST);
        assert!(seq2 > seq1);
        assert_eq!(seq2.value(), seq1.value() + 1);
    }

    #[tokio::test]
    async fn test_replay_returns_all_appended_records_in_order() {
        // テスト項目: replay が追記済みの全レコードを追記順で返す
        // given (前提条件):
        let path = temp_log_path();
        let _guard = TempLog(path.clone());
        let log = FileHistoryLog::open(&path).unwrap();
        log.append(username("alice"), body("hi"), Timestamp::new(1))
            .await
            .unwrap();
        log.append(username("bob"), body("yo"), Timestamp::new(2))
            .await
            .unwrap();

        // when (操作):
        let records = log.replay().await.unwrap();

        // then (期待する結果):
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].wire_line(), "alice: hi");
        assert_eq!(records[1].wire_line(), "bob: yo");
        assert!(records[0].sequence < records[1].sequence);
    }

    #[tokio::test]
    async fn test_replay_on_empty_log_is_empty() {
        // テスト項目: 空のログに対する replay は空のリストを返す
        // given (前提条件):
        let path = temp_log_path();
        let _guard = TempLog(path.clone());
        let log = FileHistoryLog::open(&path).unwrap();

        // when (操作):
        let records = log.replay().await.unwrap();

        // then (期待する結果):
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_log_survives_reopen() {
        // テスト項目: プロセス再起動相当の再オープン後も履歴が保持される
        // given (前提条件):
        let path = temp_log_path();
        let _guard = TempLog(path.clone());
        {
            let log = FileHistoryLog::open(&path).unwrap();
            log.append(username("alice"), body("persisted"), Timestamp::new(1))
                .await
                .unwrap();
        }

        // when (操作):
        let reopened = FileHistoryLog::open(&path).unwrap();
        let records = reopened.replay().await.unwrap();

        // then (期待する結果):
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].wire_line(), "alice: persisted");
    }

    #[tokio::test]
    async fn test_sequence_continues_after_reopen_without_gaps() {
        // テスト項目: 再オープン後のシーケンスが欠番なく継続する
        // given (前提条件):
        let path = temp_log_path();
        let _guard = TempLog(path.clone());
        {
            let log = FileHistoryLog::open(&path).unwrap();
            log.append(username("alice"), body("one"), Timestamp::new(1))
                .await
                .unwrap();
            log.append(username("alice"), body("two"), Timestamp::new(2))
                .await
                .unwrap();
        }

        // when (操作):
        let reopened = FileHistoryLog::open(&path).unwrap();
        let seq = reopened
            .append(username("bob"), body("three"), Timestamp::new(3))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(seq.value(), 3);
    }

    #[tokio::test]
    async fn test_torn_final_line_is_dropped_on_open() {
        // テスト項目: 末尾の不完全な行は警告付きで破棄され、オープンは成功する
        // given (前提条件):
        let path = temp_log_path();
        let _guard = TempLog(path.clone());
        {
            let log = FileHistoryLog::open(&path).unwrap();
            log.append(username("alice"), body("complete"), Timestamp::new(1))
                .await
                .unwrap();
        }
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            file.write_all(b"{\"sequence\":2,\"sender\":\"bo").unwrap();
        }

        // when (操作):
        let reopened = FileHistoryLog::open(&path).unwrap();
        let records = reopened.replay().await.unwrap();

        // then (期待する結果): 完全なレコードのみが残る
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].wire_line(), "alice: complete");
    }

    #[tokio::test]
    async fn test_corruption_before_the_tail_is_an_error() {
        // テスト項目: 末尾以外の破損行はエラーとして報告される
        // given (前提条件):
        let path = temp_log_path();
        let _guard = TempLog(path.clone());
        {
            let mut file = File::create(&path).unwrap();
            file.write_all(b"not json at all\n").unwrap();
            let record = ChatRecord::new(
                Sequence::FIRST,
                username("alice"),
                body("hi"),
                Timestamp::new(1),
            );
            let line = serde_json::to_string(&record).unwrap();
            file.write_all(line.as_bytes()).unwrap();
            file.write_all(b"\n").unwrap();
        }

        // when (操作):
        let result = FileHistoryLog::open(&path);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(HistoryError::Corrupt { line: 1, .. })
        ));
    }
}
