//! Server execution logic.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::domain::IdentityStore;
use crate::usecase::{
    JoinChatUseCase, LeaveChatUseCase, ReplayHistoryUseCase, SendMessageUseCase,
};

use super::{
    handler::{
        http::{bind_identity, get_history, get_username, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat synchronization server.
pub struct Server {
    /// JoinChatUseCase (connection identity binding)
    join_chat_usecase: Arc<JoinChatUseCase>,
    /// LeaveChatUseCase (connection removal)
    leave_chat_usecase: Arc<LeaveChatUseCase>,
    /// SendMessageUseCase (the broadcast engine)
    send_message_usecase: Arc<SendMessageUseCase>,
    /// ReplayHistoryUseCase (history retrieval)
    replay_history_usecase: Arc<ReplayHistoryUseCase>,
    /// Identity store for the HTTP resolution/bind surface
    identity: Arc<dyn IdentityStore>,
}

impl Server {
    pub fn new(
        join_chat_usecase: Arc<JoinChatUseCase>,
        leave_chat_usecase: Arc<LeaveChatUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        replay_history_usecase: Arc<ReplayHistoryUseCase>,
        identity: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            join_chat_usecase,
            leave_chat_usecase,
            send_message_usecase,
            replay_history_usecase,
            identity,
        }
    }

    /// Build the axum application for the given state.
    ///
    /// Public so integration tests can serve the exact production router
    /// on an ephemeral port.
    pub fn app(state: Arc<AppState>) -> Router {
        Router::new()
            // WebSocket endpoint
            .route("/chat", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/history", get(get_history))
            .route("/api/username", get(get_username))
            .route("/api/identity", post(bind_identity))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Assemble the shared state from the wired usecases.
    pub fn into_state(self) -> Arc<AppState> {
        Arc::new(AppState {
            join_chat_usecase: self.join_chat_usecase,
            leave_chat_usecase: self.leave_chat_usecase,
            send_message_usecase: self.send_message_usecase,
            replay_history_usecase: self.replay_history_usecase,
            identity: self.identity,
        })
    }

    /// Run the chat server until a shutdown signal arrives.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified
    /// address or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = Self::app(self.into_state());

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/chat", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
