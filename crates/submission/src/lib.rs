//! Job-submission hand-off between the durable store and the work queue.
//!
//! ## Design
//!
//! - One logical task per inbound submission; no shared in-process state
//! - Check-then-create deduplication of in-flight jobs, backed by a
//!   conditional insert at the storage layer
//! - Bounded retry with a per-attempt timeout around the queue push
//! - Compensating delete when the enqueue ultimately fails, so no
//!   `PENDING` record is left without a queued message
//!
//! ## Components
//!
//! - `MeetingStore` / `JobQueue`: abstractions over the two external systems
//! - `RetryableEnqueuer`: bounded-retry, per-attempt-timeout queue push
//! - `SubmissionCoordinator`: the check → create → enqueue → rollback flow
//! - `SubmissionConfig`: process-wide queue name and retry policy

pub mod config;
pub mod coordinator;
pub mod enqueuer;
pub mod error;
pub mod queue;
pub mod store;

pub use config::{EnqueuePolicy, SubmissionConfig, DEFAULT_QUEUE_NAME};
pub use coordinator::{SubmissionCoordinator, SubmissionResult};
pub use enqueuer::RetryableEnqueuer;
pub use error::{AttemptError, EnqueueError, QueueError, StoreError, SubmissionError};
pub use queue::{JobMessage, JobQueue};
pub use store::MeetingStore;
