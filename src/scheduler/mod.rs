//! Worker pool, local/global queues, and work stealing (§4.5).
//!
//! `W` OS threads each own a bounded local [`crate::queue::MpmcQueue`] of
//! runnable actors. A global queue absorbs overflow and cross-worker
//! submissions; an optional high-priority global queue is drained first,
//! for system tasks. Because the local queues are themselves MPMC rings,
//! "stealing" is nothing more than a non-owning thread calling `pop()`
//! on a peer's queue — no separate steal protocol is required.

pub mod worker;

pub use worker::{Scheduler, SchedulerConfig, SchedulerStats};
