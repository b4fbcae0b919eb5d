//! Postgres-backed meeting store.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE meetings (
//!     id           UUID PRIMARY KEY,
//!     meet_link    TEXT NOT NULL,
//!     requester_id UUID NOT NULL,
//!     status       TEXT NOT NULL,
//!     created_at   TIMESTAMPTZ NOT NULL
//! );
//! CREATE INDEX meetings_requester_idx ON meetings (requester_id, created_at DESC);
//! ```
//!
//! `create` is a conditional insert (`INSERT ... WHERE NOT EXISTS`), so the
//! "at most one in-flight record per (meet_link, requester)" rule is enforced
//! in a single statement instead of a check and an insert racing each other
//! in application code.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (unique violation) | `23505` | `Conflict` | Concurrent insert of the same record id |
//! | Zero rows from conditional insert | N/A | `Conflict` | Competing in-flight record exists |
//! | Database (other) | Any other | `Backend` | Other database errors |
//! | PoolClosed / network | N/A | `Backend` | Connection failures |

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use meetbot_core::{MeetLink, MeetingId, MeetingRecord, MeetingStatus, UserId};
use meetbot_submission::{MeetingStore, StoreError};

/// Postgres-backed durable meeting store.
///
/// `Send + Sync`; the SQLx pool handles connection management across the
/// concurrently running submission tasks.
#[derive(Debug, Clone)]
pub struct PostgresMeetingStore {
    pool: Arc<PgPool>,
}

impl PostgresMeetingStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some("23505") {
            return StoreError::Conflict;
        }
    }
    backend(e)
}

fn record_from_row(row: &PgRow) -> Result<MeetingRecord, StoreError> {
    let id: Uuid = row.try_get("id").map_err(backend)?;
    let meet_link: String = row.try_get("meet_link").map_err(backend)?;
    let requester_id: Uuid = row.try_get("requester_id").map_err(backend)?;
    let status: String = row.try_get("status").map_err(backend)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(backend)?;

    Ok(MeetingRecord {
        id: MeetingId::from_uuid(id),
        meet_link: MeetLink::parse(meet_link)
            .map_err(|e| StoreError::Backend(format!("corrupt meet_link column: {e}")))?,
        requester_id: UserId::from_uuid(requester_id),
        status: MeetingStatus::from_str(&status)
            .map_err(|e| StoreError::Backend(format!("corrupt status column: {e}")))?,
        created_at,
    })
}

#[async_trait::async_trait]
impl MeetingStore for PostgresMeetingStore {
    #[instrument(skip(self), fields(requester_id = %requester_id), err)]
    async fn find_in_flight(
        &self,
        meet_link: &MeetLink,
        requester_id: UserId,
    ) -> Result<Option<MeetingRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, meet_link, requester_id, status, created_at
            FROM meetings
            WHERE meet_link = $1
              AND requester_id = $2
              AND status IN ('PENDING', 'PROCESSING')
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(meet_link.as_str())
        .bind(*requester_id.as_uuid())
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(backend)?;

        row.as_ref().map(record_from_row).transpose()
    }

    #[instrument(skip(self, record), fields(meeting_id = %record.id), err)]
    async fn create(&self, record: MeetingRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO meetings (id, meet_link, requester_id, status, created_at)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (
                SELECT 1 FROM meetings
                WHERE meet_link = $2
                  AND requester_id = $3
                  AND status IN ('PENDING', 'PROCESSING')
            )
            "#,
        )
        .bind(*record.id.as_uuid())
        .bind(record.meet_link.as_str())
        .bind(*record.requester_id.as_uuid())
        .bind(record.status.as_str())
        .bind(record.created_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(map_insert_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(meeting_id = %id), err)]
    async fn delete(&self, id: MeetingId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(self.pool.as_ref())
            .await
            .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(meeting_id = %id), err)]
    async fn get(&self, id: MeetingId) -> Result<Option<MeetingRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, meet_link, requester_id, status, created_at
            FROM meetings
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(backend)?;

        row.as_ref().map(record_from_row).transpose()
    }

    #[instrument(skip(self), fields(requester_id = %requester_id), err)]
    async fn list_for_requester(
        &self,
        requester_id: UserId,
    ) -> Result<Vec<MeetingRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, meet_link, requester_id, status, created_at
            FROM meetings
            WHERE requester_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(*requester_id.as_uuid())
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(backend)?;

        rows.iter().map(record_from_row).collect()
    }
}
