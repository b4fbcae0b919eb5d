//! Work-queue abstraction and the job message wire format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use meetbot_core::{MeetLink, MeetingId, UserId};

use crate::error::QueueError;

/// Shared FIFO work queue (producer side only).
///
/// Implementations push to the head of a named queue; the external worker
/// consumes from the tail. Delivery is at-least-once and fire-and-forget:
/// no consumption acknowledgment is observed here, and a push that raced a
/// timeout may land twice. The worker dedupes by `meetingId`.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn push(&self, queue_name: &str, payload: String) -> Result<(), QueueError>;
}

/// Payload pushed for each accepted submission.
///
/// Field names are the wire format the worker already speaks
/// (`meetingId` / `meetLink` / `userId`); do not rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMessage {
    pub meeting_id: MeetingId,
    pub meet_link: MeetLink,
    pub user_id: UserId,
}
