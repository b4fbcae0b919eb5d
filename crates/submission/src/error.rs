//! Error taxonomy for the submission hand-off.

use thiserror::Error;

use meetbot_core::MeetingId;

/// Durable-store failure.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("meeting not found: {0}")]
    NotFound(MeetingId),
    /// The conditional insert found a competing in-flight record.
    #[error("an in-flight record already exists for this link and requester")]
    Conflict,
    #[error("storage error: {0}")]
    Backend(String),
}

/// Queue-backend failure for a single push.
#[derive(Debug, Clone, Error)]
pub enum QueueError {
    #[error("queue backend error: {0}")]
    Backend(String),
}

/// Outcome of one failed push attempt.
#[derive(Debug, Clone, Error)]
pub enum AttemptError {
    /// The per-attempt timer fired before the push resolved. The push itself
    /// is not cancelled and may still land later.
    #[error("push attempt timed out")]
    Timeout,
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// All push attempts failed; wraps the final attempt's cause.
#[derive(Debug, Clone, Error)]
#[error("enqueue failed after {attempts} attempt(s): {cause}")]
pub struct EnqueueError {
    pub attempts: u32,
    #[source]
    pub cause: AttemptError,
}

/// Caller-facing submission failure.
///
/// Raw queue errors never surface here: an exhausted enqueue (after the
/// compensating rollback) is reported as `Unavailable` so callers can apply
/// their own backoff.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("meeting not found: {0}")]
    NotFound(MeetingId),
    #[error("submission temporarily unavailable, retry later")]
    Unavailable,
}
