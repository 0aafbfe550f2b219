//! UseCase layer: the operations the UI layer drives.

pub mod error;
pub mod join_chat;
pub mod leave_chat;
pub mod replay_history;
pub mod send_message;

pub use error::SendMessageError;
pub use join_chat::JoinChatUseCase;
pub use leave_chat::LeaveChatUseCase;
pub use replay_history::ReplayHistoryUseCase;
pub use send_message::SendMessageUseCase;
