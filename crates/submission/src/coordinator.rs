//! Submission coordinator: check → create → enqueue → (rollback).
//!
//! ## Consistency notes
//!
//! The durable store and the queue are independent systems and there is no
//! cross-system transaction. Consistency is maintained only by the forward
//! path (create-then-enqueue) and the compensating delete on enqueue
//! failure. Known gaps, left to out-of-band reconciliation:
//!
//! - the compensating delete is itself best-effort: if it fails, an
//!   orphaned `PENDING` record remains (logged at `error` level)
//! - between creation and rollback the record is visible to concurrent
//!   readers
//!
//! The check-then-create race between two concurrent submissions for the
//! same `(meet_link, requester)` is closed at the storage layer: `create`
//! is a conditional insert that fails with `Conflict` when an in-flight
//! record already exists, and the loser re-reads the winner's record.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use meetbot_core::{MeetLink, MeetingId, MeetingRecord, UserId};

use crate::config::SubmissionConfig;
use crate::enqueuer::RetryableEnqueuer;
use crate::error::{StoreError, SubmissionError};
use crate::queue::{JobMessage, JobQueue};
use crate::store::MeetingStore;

/// Successful submission outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SubmissionResult {
    pub meeting_id: MeetingId,
    /// `true` when an earlier submission for the same link and requester is
    /// still in flight; no new record or message was produced.
    pub already_in_flight: bool,
}

/// Coordinates the hand-off from a join request to the work queue.
pub struct SubmissionCoordinator {
    store: Arc<dyn MeetingStore>,
    enqueuer: RetryableEnqueuer,
    config: SubmissionConfig,
}

impl SubmissionCoordinator {
    pub fn new(
        store: Arc<dyn MeetingStore>,
        queue: Arc<dyn JobQueue>,
        config: SubmissionConfig,
    ) -> Self {
        Self {
            store,
            enqueuer: RetryableEnqueuer::new(queue),
            config,
        }
    }

    /// Submit a join request.
    ///
    /// Idempotent for repeated submissions of the same link by the same
    /// requester while a prior job is still in flight: the existing record's
    /// id is returned with `already_in_flight = true` and nothing is queued.
    pub async fn submit(
        &self,
        meet_link: MeetLink,
        requester_id: UserId,
    ) -> Result<SubmissionResult, SubmissionError> {
        if let Some(existing) = self.store.find_in_flight(&meet_link, requester_id).await? {
            debug!(
                meeting_id = %existing.id,
                requester_id = %requester_id,
                "submission already in flight"
            );
            return Ok(SubmissionResult {
                meeting_id: existing.id,
                already_in_flight: true,
            });
        }

        let record = MeetingRecord::new(meet_link.clone(), requester_id);
        let message = JobMessage {
            meeting_id: record.id,
            meet_link: record.meet_link.clone(),
            user_id: requester_id,
        };
        let payload = serde_json::to_string(&message).map_err(|e| {
            error!(error = %e, "failed to serialize job message");
            SubmissionError::Unavailable
        })?;

        match self.store.create(record.clone()).await {
            Ok(()) => {}
            Err(StoreError::Conflict) => {
                // Lost a concurrent race; the conditional insert caught it.
                if let Some(existing) = self.store.find_in_flight(&meet_link, requester_id).await? {
                    return Ok(SubmissionResult {
                        meeting_id: existing.id,
                        already_in_flight: true,
                    });
                }
                // The competing record went terminal between insert and re-read.
                return Err(StoreError::Conflict.into());
            }
            Err(e) => return Err(e.into()),
        }

        match self
            .enqueuer
            .enqueue(&self.config.queue_name, payload, self.config.enqueue)
            .await
        {
            Ok(()) => {
                info!(
                    meeting_id = %record.id,
                    requester_id = %requester_id,
                    queue = %self.config.queue_name,
                    "meeting job queued"
                );
                Ok(SubmissionResult {
                    meeting_id: record.id,
                    already_in_flight: false,
                })
            }
            Err(enqueue_err) => {
                warn!(
                    meeting_id = %record.id,
                    error = %enqueue_err,
                    "enqueue exhausted; rolling back meeting record"
                );
                if let Err(delete_err) = self.store.delete(record.id).await {
                    // Orphaned PENDING record; reconciliation happens out of band.
                    error!(
                        meeting_id = %record.id,
                        error = %delete_err,
                        "rollback delete failed, record orphaned"
                    );
                }
                Err(SubmissionError::Unavailable)
            }
        }
    }

    /// All meetings submitted by `requester_id`, newest first.
    pub async fn meetings_for(
        &self,
        requester_id: UserId,
    ) -> Result<Vec<MeetingRecord>, SubmissionError> {
        Ok(self.store.list_for_requester(requester_id).await?)
    }

    /// Fetch one meeting record.
    pub async fn meeting(&self, id: MeetingId) -> Result<MeetingRecord, SubmissionError> {
        self.store
            .get(id)
            .await?
            .ok_or(SubmissionError::NotFound(id))
    }
}
