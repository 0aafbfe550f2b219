//! Wire-format DTOs exchanged with clients.

pub mod http;
pub mod websocket;
