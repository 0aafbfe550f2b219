//! Domain layer: value objects, entities and the traits the rest of the
//! server depends on.
//!
//! The traits are owned by the domain so that the usecase layer depends on
//! interfaces, not on the infrastructure implementations behind them.

pub mod entity;
pub mod history;
pub mod identity;
pub mod pusher;
pub mod value_object;

pub use entity::ChatRecord;
pub use history::{HistoryError, HistoryLog};
pub use identity::IdentityStore;
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use value_object::{
    ConnectionId, MessageBody, Sequence, Timestamp, UserId, Username, ValueError,
};
