//! Real-time group-chat synchronization server.
//!
//! Accepts long-lived WebSocket connections, binds each connection to a
//! client-held identity, broadcasts messages to every live connection in a
//! single global order and serves a durable, replayable message history.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
