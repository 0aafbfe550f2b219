//! Validated value objects for chat identities, messages and ordering.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted message body length in bytes.
pub const MAX_MESSAGE_BODY_BYTES: usize = 4096;

/// Validation errors raised by value object constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("message body must not be empty")]
    EmptyMessageBody,
    #[error("message body exceeds {MAX_MESSAGE_BODY_BYTES} bytes (got {0})")]
    MessageBodyTooLong(usize),
}

/// Opaque client-generated identity token.
///
/// The token is a capability, not authentication: the server trusts
/// whoever holds it and never verifies ownership cryptographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::EmptyUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human-readable display name resolved from a [`UserId`].
///
/// `Username::unknown()` is a valid, displayable value used when a token
/// has no binding; it is never treated as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

/// Sentinel returned for unresolvable user ids.
const UNKNOWN_USERNAME: &str = "unknown";

impl Username {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::EmptyUsername);
        }
        Ok(Self(value))
    }

    /// The sentinel username for ids with no binding.
    pub fn unknown() -> Self {
        Self(UNKNOWN_USERNAME.to_string())
    }

    /// Whether this is the unresolved-id sentinel.
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_USERNAME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Chat message body, non-empty and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::EmptyMessageBody);
        }
        if value.len() > MAX_MESSAGE_BODY_BYTES {
            return Err(ValueError::MessageBodyTooLong(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageBody {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in UTC milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Position in the global message order, strictly increasing from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sequence(u64);

impl Sequence {
    /// The sequence assigned to the first message ever appended.
    pub const FIRST: Sequence = Sequence(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The sequence that follows this one.
    pub fn next(&self) -> Sequence {
        Sequence(self.0 + 1)
    }
}

/// Server-side identifier for one live connection.
///
/// Distinct from [`UserId`]: two connections presenting the same token are
/// still two registry entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
