//! Submission configuration: queue name and enqueue retry policy.

use std::time::Duration;

/// Queue the worker consumes meeting jobs from.
pub const DEFAULT_QUEUE_NAME: &str = "meeting-jobs";

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_PER_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(2);

/// Retry policy for a single enqueue operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnqueuePolicy {
    /// Total number of push attempts (>= 1).
    pub max_attempts: u32,
    /// How long to wait on each attempt before counting it as failed.
    pub per_attempt_timeout: Duration,
}

impl Default for EnqueuePolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            per_attempt_timeout: DEFAULT_PER_ATTEMPT_TIMEOUT,
        }
    }
}

/// Process-wide submission configuration, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    pub queue_name: String,
    pub enqueue: EnqueuePolicy,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            queue_name: DEFAULT_QUEUE_NAME.to_string(),
            enqueue: EnqueuePolicy::default(),
        }
    }
}

impl SubmissionConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `MEETBOT_QUEUE_NAME`, `MEETBOT_ENQUEUE_ATTEMPTS`,
    /// `MEETBOT_ENQUEUE_TIMEOUT_MS`. Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("MEETBOT_QUEUE_NAME") {
            if !name.is_empty() {
                config.queue_name = name;
            }
        }

        if let Ok(raw) = std::env::var("MEETBOT_ENQUEUE_ATTEMPTS") {
            match raw.parse::<u32>() {
                Ok(n) if n >= 1 => config.enqueue.max_attempts = n,
                _ => tracing::warn!(value = %raw, "invalid MEETBOT_ENQUEUE_ATTEMPTS; using default"),
            }
        }

        if let Ok(raw) = std::env::var("MEETBOT_ENQUEUE_TIMEOUT_MS") {
            match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => config.enqueue.per_attempt_timeout = Duration::from_millis(ms),
                _ => tracing::warn!(value = %raw, "invalid MEETBOT_ENQUEUE_TIMEOUT_MS; using default"),
            }
        }

        config
    }

    pub fn with_queue_name(mut self, name: impl Into<String>) -> Self {
        self.queue_name = name.into();
        self
    }

    pub fn with_enqueue_policy(mut self, policy: EnqueuePolicy) -> Self {
        self.enqueue = policy;
        self
    }
}
