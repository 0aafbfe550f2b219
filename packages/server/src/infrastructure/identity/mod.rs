//! Identity store implementations.

pub mod inmemory;

pub use inmemory::InMemoryIdentityStore;
