//! Redis-list-backed work queue (producer side).
//!
//! Pushes serialized job messages with `LPUSH`; the worker consumes from the
//! tail (`BRPOP`), giving FIFO order. No acknowledgment of consumption is
//! observed here: delivery is at-least-once from this producer's point of
//! view, and a push that raced an enqueuer timeout may land twice. The
//! worker dedupes by meeting id.

use std::sync::Arc;

use async_trait::async_trait;

use meetbot_submission::{JobQueue, QueueError};

#[derive(Debug, Clone)]
pub struct RedisJobQueue {
    client: Arc<redis::Client>,
}

impl RedisJobQueue {
    /// Create a queue producer for the given Redis URL
    /// (e.g. "redis://localhost:6379").
    pub fn new(redis_url: impl AsRef<str>) -> Result<Self, QueueError> {
        let client = redis::Client::open(redis_url.as_ref())
            .map_err(|e| QueueError::Backend(format!("redis client: {e}")))?;
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn push(&self, queue_name: &str, payload: String) -> Result<(), QueueError> {
        let client = Arc::clone(&self.client);
        let key = queue_name.to_string();

        // The redis client here is synchronous; run it off the async runtime.
        tokio::task::spawn_blocking(move || {
            let mut conn = client
                .get_connection()
                .map_err(|e| QueueError::Backend(format!("connection: {e}")))?;

            let _: u64 = redis::cmd("LPUSH")
                .arg(&key)
                .arg(&payload)
                .query(&mut conn)
                .map_err(|e| QueueError::Backend(format!("LPUSH failed: {e}")))?;

            Ok(())
        })
        .await
        .map_err(|e| QueueError::Backend(format!("push task failed: {e}")))?
    }
}
