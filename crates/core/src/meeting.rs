//! Meeting record and status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{MeetingId, UserId};
use crate::meet_link::MeetLink;

/// Lifecycle status of a meeting job.
///
/// The submission path only ever writes `Pending`; the external worker owns
/// all subsequent transitions (`Pending → Processing → Completed | Failed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    /// Queued, waiting for the bot to pick it up.
    Pending,
    /// The bot has joined and is recording/transcribing.
    Processing,
    /// Recording and summary are done.
    Completed,
    /// The bot gave up on this meeting.
    Failed,
}

impl MeetingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MeetingStatus::Completed | MeetingStatus::Failed)
    }

    /// In-flight statuses participate in submission deduplication.
    pub fn is_in_flight(&self) -> bool {
        !self.is_terminal()
    }

    /// Wire representation (matches what the worker reads/writes).
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Pending => "PENDING",
            MeetingStatus::Processing => "PROCESSING",
            MeetingStatus::Completed => "COMPLETED",
            MeetingStatus::Failed => "FAILED",
        }
    }
}

impl core::str::FromStr for MeetingStatus {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(MeetingStatus::Pending),
            "PROCESSING" => Ok(MeetingStatus::Processing),
            "COMPLETED" => Ok(MeetingStatus::Completed),
            "FAILED" => Ok(MeetingStatus::Failed),
            other => Err(crate::error::DomainError::validation(format!(
                "unknown meeting status: {other}"
            ))),
        }
    }
}

/// A submitted join request, as persisted by the durable store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    /// Unique meeting/job ID.
    pub id: MeetingId,
    /// The validated link the bot should join.
    pub meet_link: MeetLink,
    /// Who asked for the bot.
    pub requester_id: UserId,
    /// Current status; only the worker moves this past `Pending`.
    pub status: MeetingStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl MeetingRecord {
    /// Create a fresh `Pending` record.
    pub fn new(meet_link: MeetLink, requester_id: UserId) -> Self {
        Self {
            id: MeetingId::new(),
            meet_link,
            requester_id,
            status: MeetingStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
