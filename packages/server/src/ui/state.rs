//! Shared application state handed to the axum handlers.

use std::sync::Arc;

use crate::domain::IdentityStore;
use crate::usecase::{
    JoinChatUseCase, LeaveChatUseCase, ReplayHistoryUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinChatUseCase (binds a connection to an identity)
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    /// LeaveChatUseCase (removes a connection from the live set)
    pub leave_chat_usecase: Arc<LeaveChatUseCase>,
    /// SendMessageUseCase (the broadcast engine)
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// ReplayHistoryUseCase (serves the durable history)
    pub replay_history_usecase: Arc<ReplayHistoryUseCase>,
    /// Identity store, used directly by the HTTP resolution/bind surface
    pub identity: Arc<dyn IdentityStore>,
}
