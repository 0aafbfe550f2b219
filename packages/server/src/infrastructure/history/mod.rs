//! History log implementations.

pub mod file;

pub use file::FileHistoryLog;
