//! Integration tests for the full submission hand-off.
//!
//! Tests: Coordinator → MeetingStore (in-memory) → RetryableEnqueuer →
//! JobQueue (in-memory), verifying the record/queue consistency invariant
//! end to end.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use meetbot_core::{MeetLink, MeetingStatus, UserId};
    use meetbot_submission::{
        EnqueuePolicy, JobMessage, MeetingStore, SubmissionConfig, SubmissionCoordinator,
        SubmissionError,
    };

    use crate::meeting_store::InMemoryMeetingStore;
    use crate::queue::InMemoryJobQueue;

    fn link() -> MeetLink {
        MeetLink::parse("https://meet.google.com/abc-defg-hij").unwrap()
    }

    fn setup() -> (
        Arc<InMemoryMeetingStore>,
        Arc<InMemoryJobQueue>,
        SubmissionCoordinator,
    ) {
        meetbot_observability::init();
        let store = InMemoryMeetingStore::arc();
        let queue = InMemoryJobQueue::arc();
        let coordinator = SubmissionCoordinator::new(
            store.clone(),
            queue.clone(),
            SubmissionConfig::default().with_enqueue_policy(EnqueuePolicy {
                max_attempts: 3,
                per_attempt_timeout: Duration::from_millis(200),
            }),
        );
        (store, queue, coordinator)
    }

    #[tokio::test]
    async fn submission_reaches_the_queue_in_wire_format() {
        let (store, queue, coordinator) = setup();
        let requester = UserId::new();

        let result = coordinator.submit(link(), requester).await.unwrap();
        assert!(!result.already_in_flight);

        // Exactly one durable record, in PENDING.
        let record = store.get(result.meeting_id).await.unwrap().unwrap();
        assert_eq!(record.status, MeetingStatus::Pending);

        // Exactly one message, with the field names the worker expects.
        assert_eq!(queue.len("meeting-jobs"), 1);
        let raw = queue.pop_tail("meeting-jobs").unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json["meetingId"],
            serde_json::json!(result.meeting_id),
        );
        assert_eq!(json["meetLink"], "https://meet.google.com/abc-defg-hij");
        assert_eq!(json["userId"], serde_json::json!(requester));

        let message: JobMessage = serde_json::from_str(&raw).unwrap();
        assert_eq!(message.meeting_id, result.meeting_id);
    }

    #[tokio::test]
    async fn duplicate_submission_queues_nothing() {
        let (store, queue, coordinator) = setup();
        let requester = UserId::new();

        let first = coordinator.submit(link(), requester).await.unwrap();
        let second = coordinator.submit(link(), requester).await.unwrap();

        assert!(second.already_in_flight);
        assert_eq!(first.meeting_id, second.meeting_id);
        assert_eq!(store.len(), 1);
        assert_eq!(queue.len("meeting-jobs"), 1);
    }

    #[tokio::test]
    async fn queue_outage_leaves_no_orphan_record() {
        let (store, queue, coordinator) = setup();
        queue.fail_next(u32::MAX);

        let err = coordinator.submit(link(), UserId::new()).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Unavailable));
        assert!(store.is_empty());
        assert!(queue.is_empty("meeting-jobs"));
    }

    #[tokio::test]
    async fn transient_outage_recovers_within_retry_budget() {
        let (store, queue, coordinator) = setup();
        queue.fail_next(2);

        let result = coordinator.submit(link(), UserId::new()).await.unwrap();

        assert!(!result.already_in_flight);
        assert_eq!(store.len(), 1);
        assert_eq!(queue.len("meeting-jobs"), 1);
    }

    #[tokio::test]
    async fn resubmission_after_failure_starts_fresh() {
        let (store, queue, coordinator) = setup();
        let requester = UserId::new();

        queue.fail_next(u32::MAX);
        let err = coordinator.submit(link(), requester).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Unavailable));

        // Backend recovers; the rolled-back submission can be retried.
        queue.fail_next(0);
        let result = coordinator.submit(link(), requester).await.unwrap();
        assert!(!result.already_in_flight);
        assert_eq!(store.len(), 1);
        assert_eq!(queue.len("meeting-jobs"), 1);
    }
}
