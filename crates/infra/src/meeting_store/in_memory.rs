//! In-memory meeting store for tests/dev.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use meetbot_core::{MeetLink, MeetingId, MeetingRecord, UserId};
use meetbot_submission::{MeetingStore, StoreError};

/// In-memory meeting store.
///
/// The conditional insert runs under a single write lock, so the
/// check-and-create is atomic just like the Postgres implementation's
/// guarded `INSERT`.
#[derive(Debug, Default)]
pub struct InMemoryMeetingStore {
    records: RwLock<HashMap<MeetingId, MeetingRecord>>,
}

impl InMemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of records currently stored (test helper).
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a record verbatim, bypassing the conditional-insert guard
    /// (test helper for seeding terminal or processing states).
    pub fn seed(&self, record: MeetingRecord) {
        self.records.write().unwrap().insert(record.id, record);
    }
}

#[async_trait]
impl MeetingStore for InMemoryMeetingStore {
    async fn find_in_flight(
        &self,
        meet_link: &MeetLink,
        requester_id: UserId,
    ) -> Result<Option<MeetingRecord>, StoreError> {
        let records = self.records.read().unwrap();
        Ok(records
            .values()
            .find(|r| {
                r.meet_link == *meet_link
                    && r.requester_id == requester_id
                    && r.status.is_in_flight()
            })
            .cloned())
    }

    async fn create(&self, record: MeetingRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap();
        let conflicting = records.values().any(|r| {
            r.meet_link == record.meet_link
                && r.requester_id == record.requester_id
                && r.status.is_in_flight()
        });
        if conflicting {
            return Err(StoreError::Conflict);
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn delete(&self, id: MeetingId) -> Result<(), StoreError> {
        self.records
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn get(&self, id: MeetingId) -> Result<Option<MeetingRecord>, StoreError> {
        Ok(self.records.read().unwrap().get(&id).cloned())
    }

    async fn list_for_requester(
        &self,
        requester_id: UserId,
    ) -> Result<Vec<MeetingRecord>, StoreError> {
        let records = self.records.read().unwrap();
        let mut result: Vec<_> = records
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.to_string().cmp(&a.id.to_string())));
        Ok(result)
    }
}
