//! Numeric identifiers used across the runtime.
//!
//! Actor identifiers are 32-bit so they fit inline in a message envelope
//! alongside `sender_id` and `sequence` without pushing the envelope past
//! its 64-byte-aligned budget (see [`crate::message::envelope`]).

// Layer 1: Standard library imports
use std::fmt::{self, Display};
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Unique identifier for an actor. `0` is reserved to mean "no actor".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// The reserved "no actor" sentinel.
    pub const NONE: ActorId = ActorId(0);

    /// Wrap a raw id. `0` is accepted but means "none" by convention.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// True unless this is the `NONE` sentinel.
    pub const fn is_some(&self) -> bool {
        self.0 != 0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::NONE
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor-{}", self.0)
    }
}

/// Process-wide generator for actor ids. Starts at 1 so `0` stays free
/// for the `NONE` sentinel.
#[derive(Debug, Default)]
pub struct ActorIdGenerator {
    next: AtomicU32,
}

impl ActorIdGenerator {
    /// Create a fresh generator.
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Allocate the next id. Wraps past `u32::MAX` back to 1, skipping 0.
    pub fn next(&self) -> ActorId {
        loop {
            let raw = self.next.fetch_add(1, Ordering::Relaxed);
            if raw != 0 {
                return ActorId(raw);
            }
            // wrapped to 0: bump again so the caller never observes NONE
        }
    }
}

/// Monotonic sequence number assigned to a message envelope at
/// pool-acquire time. `0` means "slot is free"; this type can never
/// hold that value, so a live envelope's sequence is always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence(NonZeroU64);

impl Sequence {
    /// Wrap a non-zero raw value.
    pub const fn new(raw: NonZeroU64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub const fn get(&self) -> u64 {
        self.0.get()
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide generator for envelope sequence numbers. Skips 0 on wrap
/// per the pool's "0 == free slot" convention.
#[derive(Debug, Default)]
pub struct SequenceGenerator {
    next: AtomicU64,
}

impl SequenceGenerator {
    /// Create a fresh generator.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Allocate the next sequence number.
    pub fn next(&self) -> Sequence {
        loop {
            let raw = self.next.fetch_add(1, Ordering::Relaxed);
            if let Some(nz) = NonZeroU64::new(raw) {
                return Sequence(nz);
            }
            // wrapped to 0: retry so callers never observe the free-slot value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_none_is_zero() {
        assert_eq!(ActorId::NONE.as_raw(), 0);
        assert!(!ActorId::NONE.is_some());
    }

    #[test]
    fn actor_id_generator_skips_zero_and_is_monotonic() {
        let gen = ActorIdGenerator::new();
        let a = gen.next();
        let b = gen.next();
        assert!(a.is_some());
        assert!(b.is_some());
        assert!(a.as_raw() < b.as_raw());
    }

    #[test]
    fn sequence_generator_never_yields_zero() {
        let gen = SequenceGenerator::new();
        for _ in 0..10 {
            assert_ne!(gen.next().get(), 0);
        }
    }

    #[test]
    fn sequence_generator_skips_zero_on_wrap() {
        let gen = SequenceGenerator {
            next: AtomicU64::new(u64::MAX),
        };
        let last = gen.next();
        assert_eq!(last.get(), u64::MAX);
        let wrapped = gen.next();
        assert_eq!(wrapped.get(), 1);
    }

    #[test]
    fn actor_id_display() {
        let id = ActorId::from_raw(42);
        assert_eq!(format!("{id}"), "actor-42");
    }
}
