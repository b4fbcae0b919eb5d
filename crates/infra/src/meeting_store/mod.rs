//! Durable meeting-store implementations.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryMeetingStore;
pub use postgres::PostgresMeetingStore;
