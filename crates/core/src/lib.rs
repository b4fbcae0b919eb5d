//! `meetbot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the validated meeting link, and the meeting
//! record with its status lifecycle.

pub mod error;
pub mod id;
pub mod meet_link;
pub mod meeting;

pub use error::{DomainError, DomainResult};
pub use id::{MeetingId, UserId};
pub use meet_link::MeetLink;
pub use meeting::{MeetingRecord, MeetingStatus};
