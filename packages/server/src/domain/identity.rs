//! Identity store trait: opaque token to username mapping.

use async_trait::async_trait;

use super::value_object::{UserId, Username};

/// Mapping from client-held tokens to display names.
///
/// Possession of a token is the only credential; there is no cryptographic
/// ownership check here. Hardening belongs to an external auth surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Resolve the username bound to `user_id`.
    ///
    /// Lookups never fail: an unbound id degrades to
    /// [`Username::unknown()`], which callers must treat as a valid,
    /// displayable state.
    async fn resolve(&self, user_id: &UserId) -> Username;

    /// Bind `username` to `user_id`, replacing any previous binding
    /// (last write wins). Used by the auth surface, not the chat core.
    async fn bind(&self, user_id: UserId, username: Username);
}
