//! Infrastructure layer: concrete implementations of the domain traits.

pub mod dto;
pub mod history;
pub mod identity;
pub mod pusher;
