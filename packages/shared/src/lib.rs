//! Shared utilities for the Sohbet chat server.
//!
//! Logging setup and time helpers used by the server crate and its binary.

pub mod logger;
pub mod time;
