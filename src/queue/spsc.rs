//! Single-producer/single-consumer ring buffer.
//!
//! Used exactly once in this crate: the supervisor's delayed-restart
//! timer queue, where one timer thread is the sole producer and the
//! supervisor loop is the sole consumer. That single-writer/single-reader
//! property lets the slow path (CAS, per-slot sequence numbers) in
//! [`crate::queue::mpmc`] be skipped entirely.

// Layer 1: Standard library imports
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::queue::QueueError;

const CACHE_LINE: usize = 64;

#[repr(align(64))]
struct CachePadded<T>(T);

/// Fixed-capacity SPSC ring buffer. Capacity is rounded up to the next
/// power of two.
pub struct SpscQueue<T> {
    mask: usize,
    buf: Box<[UnsafeCell<MaybeUninit<T>>]>,
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
}

// SAFETY: access to `buf` slots is partitioned by index ownership: the
// producer only ever touches slots it has reserved via `tail`, the
// consumer only ever touches slots published and not yet popped.
unsafe impl<T: Send> Sync for SpscQueue<T> {}

impl<T> SpscQueue<T> {
    /// Create a ring with at least `capacity` slots (rounded up to a
    /// power of two).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.next_power_of_two().max(2);
        let buf = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            mask: capacity - 1,
            buf,
            head: CachePadded(AtomicUsize::new(0)),
            tail: CachePadded(AtomicUsize::new(0)),
        }
    }

    /// Capacity rounded up to the power of two actually allocated.
    pub fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Push a value. Fails with [`QueueError::Full`] if the ring has no
    /// free slot; never blocks.
    pub fn push(&self, value: T) -> Result<(), QueueError> {
        let tail = self.tail.0.load(Ordering::Relaxed);
        let head = self.head.0.load(Ordering::Acquire);
        if tail.wrapping_sub(head) >= self.buf.len() {
            return Err(QueueError::Full);
        }
        let slot = &self.buf[tail & self.mask];
        // SAFETY: single producer, slot is not visible to the consumer
        // until the tail store below.
        unsafe {
            (*slot.get()).write(value);
        }
        self.tail.0.store(tail.wrapping_add(1), Ordering::Release);
        Ok(())
    }

    /// Pop a value. Fails with [`QueueError::Empty`] if the ring has
    /// nothing ready; never blocks.
    pub fn pop(&self) -> Result<T, QueueError> {
        let head = self.head.0.load(Ordering::Relaxed);
        let tail = self.tail.0.load(Ordering::Acquire);
        if head == tail {
            return Err(QueueError::Empty);
        }
        let slot = &self.buf[head & self.mask];
        // SAFETY: single consumer, slot was published by the producer's
        // Release store to `tail` observed above via Acquire.
        let value = unsafe { (*slot.get()).assume_init_read() };
        self.head.0.store(head.wrapping_add(1), Ordering::Release);
        Ok(value)
    }

    /// True if the ring currently holds no elements. Racy under
    /// concurrent use; intended for diagnostics, not control flow.
    pub fn is_empty(&self) -> bool {
        self.head.0.load(Ordering::Relaxed) == self.tail.0.load(Ordering::Relaxed)
    }
}

const _: () = assert!(CACHE_LINE == 64);
