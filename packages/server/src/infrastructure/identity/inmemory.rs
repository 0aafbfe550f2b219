//! In-memory identity store.
//!
//! Token → username mapping behind a mutex. Reads are the common case; the
//! only writers are the auth-surface bind endpoint.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{IdentityStore, UserId, Username};

/// HashMap-backed [`IdentityStore`].
pub struct InMemoryIdentityStore {
    bindings: Mutex<HashMap<String, Username>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            bindings: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn resolve(&self, user_id: &UserId) -> Username {
        let bindings = self.bindings.lock().await;
        match bindings.get(user_id.as_str()) {
            Some(username) => username.clone(),
            None => Username::unknown(),
        }
    }

    async fn bind(&self, user_id: UserId, username: Username) {
        let mut bindings = self.bindings.lock().await;
        tracing::debug!(
            "Bound user id '{}' to username '{}'",
            user_id.as_str(),
            username.as_str()
        );
        bindings.insert(user_id.into_string(), username);
    }
}
