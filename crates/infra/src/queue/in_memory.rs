//! In-memory work queue for tests/dev.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use meetbot_submission::{JobQueue, QueueError};

/// In-memory named queues with LPUSH-at-head semantics.
///
/// Payloads are pushed to the head and a consumer takes from the tail, the
/// same shape a Redis list gives the worker. `fail_next` lets tests script
/// backend outages.
#[derive(Debug, Default)]
pub struct InMemoryJobQueue {
    queues: RwLock<HashMap<String, VecDeque<String>>>,
    fail_next: AtomicU32,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Make the next `n` pushes fail with a backend error.
    pub fn fail_next(&self, n: u32) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    /// Number of messages currently queued under `queue_name`.
    pub fn len(&self, queue_name: &str) -> usize {
        self.queues
            .read()
            .unwrap()
            .get(queue_name)
            .map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, queue_name: &str) -> bool {
        self.len(queue_name) == 0
    }

    /// Consume the oldest message, the way the worker would.
    pub fn pop_tail(&self, queue_name: &str) -> Option<String> {
        self.queues
            .write()
            .unwrap()
            .get_mut(queue_name)
            .and_then(VecDeque::pop_back)
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn push(&self, queue_name: &str, payload: String) -> Result<(), QueueError> {
        let scripted = self
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if scripted {
            return Err(QueueError::Backend("simulated outage".to_string()));
        }

        self.queues
            .write()
            .unwrap()
            .entry(queue_name.to_string())
            .or_default()
            .push_front(payload);
        Ok(())
    }
}
