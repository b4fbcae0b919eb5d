//! Bounded-retry queue push with a per-attempt timeout.

use std::sync::Arc;

use tracing::warn;

use crate::config::EnqueuePolicy;
use crate::error::{AttemptError, EnqueueError, QueueError};
use crate::queue::JobQueue;

/// Wraps a single push onto the work queue with bounded retry.
///
/// Each attempt races the push against a timer. A fired timer only abandons
/// the *wait*: the push runs on a detached task and may still reach the
/// backend afterwards, so a retried push can land twice. The worker is
/// expected to dedupe by meeting id.
///
/// Retries are immediate (no backoff); the final attempt's error is
/// propagated instead of swallowed.
#[derive(Clone)]
pub struct RetryableEnqueuer {
    queue: Arc<dyn JobQueue>,
}

impl RetryableEnqueuer {
    pub fn new(queue: Arc<dyn JobQueue>) -> Self {
        Self { queue }
    }

    /// Push `payload` onto `queue_name`, making up to `policy.max_attempts`
    /// attempts of `policy.per_attempt_timeout` each.
    pub async fn enqueue(
        &self,
        queue_name: &str,
        payload: String,
        policy: EnqueuePolicy,
    ) -> Result<(), EnqueueError> {
        let max_attempts = policy.max_attempts.max(1);
        let mut last_failure = AttemptError::Timeout;

        for attempt in 1..=max_attempts {
            let queue = Arc::clone(&self.queue);
            let name = queue_name.to_string();
            let body = payload.clone();
            // Detached so a timed-out attempt does not cancel the push.
            let push = tokio::spawn(async move { queue.push(&name, body).await });

            let failure = match tokio::time::timeout(policy.per_attempt_timeout, push).await {
                Ok(Ok(Ok(()))) => return Ok(()),
                Ok(Ok(Err(e))) => AttemptError::Queue(e),
                Ok(Err(join_err)) => {
                    AttemptError::Queue(QueueError::Backend(format!("push task failed: {join_err}")))
                }
                Err(_) => AttemptError::Timeout,
            };

            warn!(
                queue = queue_name,
                attempt,
                max_attempts,
                error = %failure,
                "queue push attempt failed"
            );
            last_failure = failure;
        }

        Err(EnqueueError {
            attempts: max_attempts,
            cause: last_failure,
        })
    }
}
