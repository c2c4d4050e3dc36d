//! Lock-free ring-buffer primitives the rest of the runtime is built on.
//!
//! Two shapes are needed (§4.1): a single-producer/single-consumer ring
//! for the supervisor's delayed-restart timer queue, and a
//! multi-producer/multi-consumer ring for everything that is touched by
//! more than one thread on either end — the message pool free-list,
//! mailboxes, and scheduler queues.

pub mod mpmc;
pub mod spsc;

pub use mpmc::MpmcQueue;
pub use spsc::SpscQueue;

/// Result of a non-blocking ring-buffer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The ring has no free slot for `push`.
    Full,
    /// The ring has no element for `pop`.
    Empty,
}
