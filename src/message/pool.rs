//! Preallocated, fixed-capacity pool of [`Envelope`] slots.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicUsize, Ordering};

// Layer 2: Third-party crate imports
use thiserror::Error;
use tracing::warn;

// Layer 3: Internal module imports
use crate::message::envelope::{Envelope, Kind, Payload};
use crate::queue::{MpmcQueue, QueueError};
use crate::util::{ActorId, Sequence, SequenceGenerator};

/// Default preallocated envelope count (§6).
pub const DEFAULT_POOL_CAPACITY: usize = 65_535;

/// Errors surfaced by pool operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// No envelope available; the caller must drop the message or
    /// back-pressure at the application layer (§4.2 — `acquire` never
    /// spin-waits).
    #[error("message pool exhausted")]
    Exhausted,
}

impl PoolError {
    /// All current pool errors are transient — retrying later, after
    /// some envelopes are released, may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, PoolError::Exhausted)
    }
}

/// A fixed-capacity array of envelopes plus a bounded MPMC free-list of
/// pointers to free slots (§3, §4.2).
pub struct Pool {
    slots: Box<[Envelope]>,
    free_list: MpmcQueue<usize>,
    sequences: SequenceGenerator,
    dropped_on_release: AtomicUsize,
}

impl Pool {
    /// Preallocate `capacity` envelopes (rounded up to a power of two by
    /// the underlying free-list ring) and seed the free-list with every
    /// slot index.
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Envelope::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let free_list = MpmcQueue::new(capacity);
        for idx in 0..capacity {
            // Capacity was just sized to fit `capacity` entries; this
            // cannot fail.
            let _ = free_list.push(idx);
        }
        Self {
            slots,
            free_list,
            sequences: SequenceGenerator::new(),
            dropped_on_release: AtomicUsize::new(0),
        }
    }

    /// Total number of preallocated slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Acquire a free slot and publish `kind`/`actor_id`/`sender_id`/
    /// `payload` into it, tagged with a freshly assigned sequence.
    /// Fails immediately (no spin-wait) if the pool is exhausted.
    pub fn acquire(
        &self,
        kind: Kind,
        actor_id: ActorId,
        sender_id: ActorId,
        payload: Payload,
    ) -> Result<usize, PoolError> {
        let idx = match self.free_list.pop() {
            Ok(idx) => idx,
            Err(QueueError::Empty) => return Err(PoolError::Exhausted),
            Err(QueueError::Full) => unreachable!("pop never returns Full"),
        };
        let sequence = self.sequences.next();
        self.slots[idx].publish(kind, actor_id, sender_id, payload, sequence);
        Ok(idx)
    }

    /// Borrow the envelope at `idx`. Callers obtain `idx` from
    /// [`Pool::acquire`] or from a mailbox/queue that was handed the
    /// index earlier.
    pub fn envelope(&self, idx: usize) -> &Envelope {
        &self.slots[idx]
    }

    /// Release the envelope at `idx` back to the free-list: zeroes it
    /// (tag/payload → defaults, sequence → 0) and pushes its index.
    /// A double-release (slot already free) is a detected no-op.
    pub fn release(&self, idx: usize) {
        if !self.slots[idx].release() {
            return;
        }
        if self.free_list.push(idx).is_err() {
            // Free-list full on release indicates an accounting defect
            // (more releases than capacity) — log and drop rather than
            // leak or panic the releasing thread.
            warn!(slot = idx, "pool free-list full on release, dropping slot");
            self.dropped_on_release.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Count of slots lost to a full free-list on release. Should stay
    /// at 0 in a correctly accounted system; a nonzero value is a bug
    /// signal.
    pub fn dropped_on_release(&self) -> usize {
        self.dropped_on_release.load(Ordering::Relaxed)
    }

    /// Approximate count of free slots. Racy under concurrent use;
    /// intended for the statistics snapshot (§3.1), not correctness.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Sequence number that would be assigned by the next `acquire`,
    /// without consuming it. Exposed for diagnostics only.
    pub fn peek_next_sequence(&self) -> Sequence {
        self.sequences.next()
    }
}
