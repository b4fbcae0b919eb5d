//! Durable meeting-store abstraction.

use async_trait::async_trait;

use meetbot_core::{MeetLink, MeetingId, MeetingRecord, UserId};

use crate::error::StoreError;

/// Durable storage for meeting records.
///
/// The store and the queue are independent systems; the coordinator performs
/// no cross-system transaction. Implementations must be safe to share across
/// concurrently running submissions.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Find a record for `(meet_link, requester_id)` whose status is still
    /// in flight (`PENDING` or `PROCESSING`). Terminal records are ignored.
    async fn find_in_flight(
        &self,
        meet_link: &MeetLink,
        requester_id: UserId,
    ) -> Result<Option<MeetingRecord>, StoreError>;

    /// Persist a new record, conditionally: fails with [`StoreError::Conflict`]
    /// when an in-flight record for the same `(meet_link, requester_id)`
    /// already exists. This makes check-and-create atomic at the storage
    /// layer instead of two racing round-trips in application code.
    async fn create(&self, record: MeetingRecord) -> Result<(), StoreError>;

    /// Delete a record (compensation path).
    async fn delete(&self, id: MeetingId) -> Result<(), StoreError>;

    /// Fetch a single record.
    async fn get(&self, id: MeetingId) -> Result<Option<MeetingRecord>, StoreError>;

    /// All records for a requester, newest first.
    async fn list_for_requester(
        &self,
        requester_id: UserId,
    ) -> Result<Vec<MeetingRecord>, StoreError>;
}
