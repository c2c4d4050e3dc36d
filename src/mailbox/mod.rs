//! Per-actor bounded inbox built on the MPMC ring (§4.3).
//!
//! Producers are many — any thread holding an `ActorRef` may send.
//! The consumer is exactly one: whichever worker currently owns the
//! actor's drain. That single-consumer discipline is enforced above
//! this module, by the scheduler's scheduled flag (§9); the mailbox
//! itself only guarantees safe concurrent `send`.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::queue::{MpmcQueue, QueueError};

/// Errors surfaced by mailbox operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    /// The mailbox is at capacity; surfaced to the sender (§5
    /// back-pressure).
    #[error("mailbox is full")]
    Full,
}

/// A bounded queue of pool slot indices addressed to one actor.
pub struct Mailbox {
    queue: MpmcQueue<usize>,
    sent: AtomicU64,
    received: AtomicU64,
    dropped: AtomicU64,
}

impl Mailbox {
    /// Create a mailbox with at least `capacity` slots (rounded up to a
    /// power of two by the ring, recommended 1024-4096 per §3).
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: MpmcQueue::new(capacity),
            sent: AtomicU64::new(0),
            received: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Enqueue a pool slot index. Never blocks; fails with
    /// [`MailboxError::Full`] if the mailbox is at capacity.
    pub fn send(&self, slot: usize) -> Result<(), MailboxError> {
        match self.queue.push(slot) {
            Ok(()) => {
                self.sent.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(QueueError::Full) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Err(MailboxError::Full)
            }
            Err(QueueError::Empty) => unreachable!("push never returns Empty"),
        }
    }

    /// Drain up to `buf.len()` slot indices into `buf`, returning how
    /// many were written. Returns `0` if the mailbox is empty.
    pub fn recv_batch(&self, buf: &mut [usize]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.queue.pop() {
                Ok(slot) => {
                    buf[n] = slot;
                    n += 1;
                }
                Err(QueueError::Empty) => break,
                Err(QueueError::Full) => unreachable!("pop never returns Full"),
            }
        }
        if n > 0 {
            self.received.fetch_add(n as u64, Ordering::Relaxed);
        }
        n
    }

    /// True if the mailbox currently holds no messages.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Approximate current depth.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Total messages ever accepted by `send`.
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Total messages ever drained by `recv_batch`.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    /// Total messages rejected because the mailbox was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
