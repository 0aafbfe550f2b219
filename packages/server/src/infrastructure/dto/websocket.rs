//! Inbound WebSocket frame shapes.
//!
//! Two JSON shapes arrive on the channel; the outbound side is a single
//! plain-text shape, `"<username>: <message>"`, rendered by the domain.

use serde::Deserialize;

/// Inbound frame, tagged by the `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundFrame {
    /// Binds the connection's identity. Valid exactly once per connection.
    Init {
        #[serde(rename = "userID")]
        user_id: String,
        username: String,
    },
    /// A chat message from an already-joined connection.
    ///
    /// `userID` and `username` are carried for shape compatibility with
    /// the client; delivery uses the identity bound at `init` time.
    Message {
        #[serde(rename = "userID")]
        user_id: String,
        username: String,
        message: String,
    },
}
