//! Work-queue implementations (producer side).

pub mod in_memory;
#[cfg(feature = "redis")]
pub mod redis_queue;

pub use in_memory::InMemoryJobQueue;
#[cfg(feature = "redis")]
pub use redis_queue::RedisJobQueue;
