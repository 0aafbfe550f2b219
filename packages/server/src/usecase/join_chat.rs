//! UseCase: joining the chat (handling a valid `init` frame).
//!
//! Resolves the display name for the presented token and registers the
//! connection's outbound channel with the registry, making it a broadcast
//! target from this point on.

use std::sync::Arc;

use crate::domain::{ConnectionId, IdentityStore, MessagePusher, PusherChannel, UserId, Username};

/// Binds a connection to an identity and adds it to the live set.
pub struct JoinChatUseCase {
    /// Identity store (token → username).
    identity: Arc<dyn IdentityStore>,
    /// Connection registry.
    pusher: Arc<dyn MessagePusher>,
}

impl JoinChatUseCase {
    pub fn new(identity: Arc<dyn IdentityStore>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { identity, pusher }
    }

    /// Execute the join.
    ///
    /// The stored binding wins over the username claimed in the `init`
    /// payload; an unbound token falls back to the claimed name, since the
    /// client echoes the username it obtained at login.
    ///
    /// # Arguments
    ///
    /// * `connection_id` - Registry key for this connection
    /// * `user_id` - Token presented in the `init` frame
    /// * `claimed_username` - Username carried by the `init` frame
    /// * `sender` - The connection's outbound channel
    ///
    /// # Returns
    ///
    /// The display name now bound to the connection.
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        user_id: UserId,
        claimed_username: Username,
        sender: PusherChannel,
    ) -> Username {
        let stored = self.identity.resolve(&user_id).await;
        let display_name = if stored.is_unknown() {
            claimed_username
        } else {
            stored
        };

        self.pusher.register(connection_id.clone(), sender).await;

        tracing::info!(
            "Connection '{}' joined as '{}' (user id '{}')",
            connection_id,
            display_name.as_str(),
            user_id.as_str()
        );

        display_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::MockIdentityStore;
    use crate::domain::pusher::MockMessagePusher;
    use tokio::sync::mpsc;

    fn user_id(value: &str) -> UserId {
        UserId::new(value.to_string()).unwrap()
    }

    fn username(value: &str) -> Username {
        Username::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_prefers_stored_binding_over_claimed_username() {
        // テスト項目: ストアに登録済みのユーザー名が init の申告より優先される
        // given (前提条件):
        let mut identity = MockIdentityStore::new();
        identity
            .expect_resolve()
            .times(1)
            .returning(|_| username("alice"));

        let mut pusher = MockMessagePusher::new();
        pusher.expect_register().times(1).returning(|_, _| ());

        let usecase = JoinChatUseCase::new(Arc::new(identity), Arc::new(pusher));
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let display_name = usecase
            .execute(
                ConnectionId::generate(),
                user_id("u1"),
                username("impostor"),
                tx,
            )
            .await;

        // then (期待する結果):
        assert_eq!(display_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_join_falls_back_to_claimed_username_when_unbound() {
        // テスト項目: 未登録トークンの場合は init の申告ユーザー名が使われる
        // given (前提条件):
        let mut identity = MockIdentityStore::new();
        identity
            .expect_resolve()
            .times(1)
            .returning(|_| Username::unknown());

        let mut pusher = MockMessagePusher::new();
        pusher.expect_register().times(1).returning(|_, _| ());

        let usecase = JoinChatUseCase::new(Arc::new(identity), Arc::new(pusher));
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let display_name = usecase
            .execute(ConnectionId::generate(), user_id("u2"), username("bob"), tx)
            .await;

        // then (期待する結果):
        assert_eq!(display_name.as_str(), "bob");
    }

    #[tokio::test]
    async fn test_join_registers_connection_exactly_once() {
        // テスト項目: join で接続がレジストリに一度だけ登録される
        // given (前提条件):
        let mut identity = MockIdentityStore::new();
        identity
            .expect_resolve()
            .returning(|_| Username::unknown());

        let mut pusher = MockMessagePusher::new();
        pusher.expect_register().times(1).returning(|_, _| ());

        let usecase = JoinChatUseCase::new(Arc::new(identity), Arc::new(pusher));
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        usecase
            .execute(ConnectionId::generate(), user_id("u3"), username("eve"), tx)
            .await;

        // then (期待する結果): expect_register の times(1) が検証する
    }
}
