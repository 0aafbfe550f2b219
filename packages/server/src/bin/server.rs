//! Real-time group-chat synchronization server.
//!
//! Broadcasts messages from any connected client to every live connection
//! in one global order and serves the durable history to joining clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sohbet-server
//! cargo run --bin sohbet-server -- --host 0.0.0.0 --port 3000
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use sohbet_server::{
    infrastructure::{
        history::FileHistoryLog, identity::InMemoryIdentityStore, pusher::WebSocketMessagePusher,
    },
    ui::Server,
    usecase::{JoinChatUseCase, LeaveChatUseCase, ReplayHistoryUseCase, SendMessageUseCase},
};
use sohbet_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sohbet-server")]
#[command(about = "Group-chat synchronization server with durable history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8085")]
    port: u16,

    /// Path of the append-only history log file
    #[arg(long, default_value = "sohbet-history.jsonl")]
    history_file: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. History log + identity store
    // 2. MessagePusher (connection registry)
    // 3. UseCases
    // 4. Server

    // 1. Open the durable history log and the identity store
    let history = match FileHistoryLog::open(&args.history_file) {
        Ok(history) => Arc::new(history),
        Err(e) => {
            tracing::error!(
                "Failed to open history log {}: {}",
                args.history_file.display(),
                e
            );
            std::process::exit(1);
        }
    };
    let identity = Arc::new(InMemoryIdentityStore::new());

    // 2. Create the connection registry
    let pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(identity.clone(), pusher.clone()));
    let leave_chat_usecase = Arc::new(LeaveChatUseCase::new(pusher.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(history.clone(), pusher.clone()));
    let replay_history_usecase = Arc::new(ReplayHistoryUseCase::new(history));

    // 4. Create and run the server
    let server = Server::new(
        join_chat_usecase,
        leave_chat_usecase,
        send_message_usecase,
        replay_history_usecase,
        identity,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
