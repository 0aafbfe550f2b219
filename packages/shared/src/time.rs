//! Time-related utilities.

use chrono::Utc;

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_utc_timestamp_returns_positive_value() {
        // テスト項目: get_utc_timestamp が正の値を返す
        // given (前提条件):

        // when (操作):
        let timestamp = get_utc_timestamp();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_get_utc_timestamp_is_monotonic_enough() {
        // テスト項目: 連続して呼び出しても時刻が巻き戻らない
        // given (前提条件):
        let timestamp1 = get_utc_timestamp();

        // when (操作):
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = get_utc_timestamp();

        // then (期待する結果):
        assert!(timestamp2 >= timestamp1);
    }
}
