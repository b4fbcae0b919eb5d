//! Infrastructure implementations of the submission collaborators.
//!
//! The abstractions (`MeetingStore`, `JobQueue`) live in `meetbot-submission`
//! as pure mechanics. This crate provides the backed implementations:
//! Postgres for the durable store, Redis for the work queue, and in-memory
//! versions for tests and development.

pub mod meeting_store;
pub mod queue;

#[cfg(test)]
mod integration_tests;

pub use meeting_store::{InMemoryMeetingStore, PostgresMeetingStore};
pub use queue::InMemoryJobQueue;
#[cfg(feature = "redis")]
pub use queue::RedisJobQueue;
