//! The fixed-layout message record every send in the system produces.
//!
//! An [`Envelope`] lives inside the [`crate::message::pool::Pool`]'s
//! preallocated array for its whole "in transit + being processed"
//! lifetime. Exactly one thread owns it at a time — the sender while
//! constructing it, then the worker draining the destination mailbox —
//! so its payload fields need no locking of their own; only `sequence`
//! is atomic, since it doubles as the pool's free/in-use marker and
//! must be checked and cleared safely on release.

// Layer 1: Standard library imports
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::util::{ActorId, Sequence};

/// Maximum inline string payload length.
pub const INLINE_STRING_CAPACITY: usize = 32;

/// Discriminant for an envelope's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    UserString,
    UserInt,
    UserFloat,
    UserBlob,
    SystemStart,
    SystemStop,
    SystemRestart,
    SystemPing,
    SystemPong,
    ControlShutdown,
    ControlSuspend,
    ControlResume,
}

impl Kind {
    /// True for the `System*` family.
    pub fn is_system(&self) -> bool {
        matches!(
            self,
            Kind::SystemStart
                | Kind::SystemStop
                | Kind::SystemRestart
                | Kind::SystemPing
                | Kind::SystemPong
        )
    }

    /// True for the `Control*` family.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Kind::ControlShutdown | Kind::ControlSuspend | Kind::ControlResume
        )
    }
}

/// Heap-backed overflow form for user payloads too large for the
/// envelope's inline slot. Ownership follows the envelope: destroyed
/// when the envelope is released.
#[derive(Debug, Clone)]
pub struct UserBlob {
    pub bytes: Box<[u8]>,
    pub type_tag: u64,
}

/// Tagged union of everything an envelope can carry. The active variant
/// must match the envelope's [`Kind`]; `System*`/`Control*` kinds carry
/// [`Payload::None`].
#[derive(Debug, Clone)]
pub enum Payload {
    None,
    Int(i64),
    Float(f64),
    Str { buf: [u8; INLINE_STRING_CAPACITY], len: u8 },
    Blob(UserBlob),
}

impl Payload {
    /// Build an inline string payload, truncating silently past
    /// [`INLINE_STRING_CAPACITY`] bytes (callers that need the full
    /// string should use [`Payload::Blob`] instead).
    pub fn from_str(s: &str) -> Self {
        let bytes = s.as_bytes();
        let len = bytes.len().min(INLINE_STRING_CAPACITY);
        let mut buf = [0u8; INLINE_STRING_CAPACITY];
        buf[..len].copy_from_slice(&bytes[..len]);
        Payload::Str {
            buf,
            len: len as u8,
        }
    }

    /// Borrow the inline string payload as `&str`, if this is a `Str`
    /// variant with valid UTF-8 content.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::Str { buf, len } => std::str::from_utf8(&buf[..*len as usize]).ok(),
            _ => None,
        }
    }

    /// The `User*` [`Kind`] a user send carrying this payload should be
    /// tagged with.
    pub fn user_kind(&self) -> Kind {
        match self {
            Payload::Int(_) => Kind::UserInt,
            Payload::Float(_) => Kind::UserFloat,
            Payload::Str { .. } => Kind::UserString,
            Payload::Blob(_) | Payload::None => Kind::UserBlob,
        }
    }
}

/// Converts a caller's value into the envelope's tagged [`Payload`]
/// union. Implemented for the handful of shapes a user send carries
/// directly; anything larger goes through [`Payload::Blob`].
pub trait IntoPayload {
    fn into_payload(self) -> Payload;
}

impl IntoPayload for Payload {
    fn into_payload(self) -> Payload {
        self
    }
}

impl IntoPayload for i64 {
    fn into_payload(self) -> Payload {
        Payload::Int(self)
    }
}

impl IntoPayload for f64 {
    fn into_payload(self) -> Payload {
        Payload::Float(self)
    }
}

impl IntoPayload for &str {
    fn into_payload(self) -> Payload {
        Payload::from_str(self)
    }
}

impl IntoPayload for String {
    fn into_payload(self) -> Payload {
        Payload::from_str(&self)
    }
}

impl IntoPayload for Vec<u8> {
    fn into_payload(self) -> Payload {
        Payload::Blob(UserBlob {
            bytes: self.into_boxed_slice(),
            type_tag: 0,
        })
    }
}

struct Slot {
    kind: Kind,
    actor_id: ActorId,
    sender_id: ActorId,
    payload: Payload,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            kind: Kind::SystemStart,
            actor_id: ActorId::NONE,
            sender_id: ActorId::NONE,
            payload: Payload::None,
        }
    }
}

/// A 64-byte-aligned message record. Acquired from and released back to
/// a [`crate::message::pool::Pool`]; never constructed standalone.
#[repr(align(64))]
pub struct Envelope {
    sequence: AtomicU64,
    slot: UnsafeCell<Slot>,
}

// SAFETY: `sequence` gates ownership. A non-zero sequence means exactly
// one thread (the current holder, tracked by the pool's acquire/release
// discipline) may touch `slot`; a zero sequence means the envelope is on
// the free-list and untouched until the next `acquire`.
unsafe impl Sync for Envelope {}

impl Envelope {
    pub(crate) fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
            slot: UnsafeCell::new(Slot::default()),
        }
    }

    /// The envelope's sequence number. `0` means the slot is free.
    pub fn sequence_raw(&self) -> u64 {
        self.sequence.load(Ordering::Acquire)
    }

    /// True if this envelope currently holds a live (unreleased) message.
    pub fn is_live(&self) -> bool {
        self.sequence_raw() != 0
    }

    /// The envelope's sequence, if live.
    pub fn sequence(&self) -> Option<Sequence> {
        std::num::NonZeroU64::new(self.sequence_raw()).map(Sequence::new)
    }

    pub fn kind(&self) -> Kind {
        // SAFETY: caller holds the envelope (sequence != 0 established
        // by the pool before handing out a reference).
        unsafe { (*self.slot.get()).kind }
    }

    pub fn actor_id(&self) -> ActorId {
        unsafe { (*self.slot.get()).actor_id }
    }

    pub fn sender_id(&self) -> ActorId {
        unsafe { (*self.slot.get()).sender_id }
    }

    pub fn payload(&self) -> &Payload {
        unsafe { &(*self.slot.get()).payload }
    }

    /// Publish a message into this (freshly acquired) envelope, tagging
    /// it with the sequence assigned by the pool.
    pub(crate) fn publish(
        &self,
        kind: Kind,
        actor_id: ActorId,
        sender_id: ActorId,
        payload: Payload,
        sequence: Sequence,
    ) {
        // SAFETY: called only by the pool immediately after `acquire`,
        // before the envelope pointer is handed to any other thread.
        unsafe {
            let slot = &mut *self.slot.get();
            slot.kind = kind;
            slot.actor_id = actor_id;
            slot.sender_id = sender_id;
            slot.payload = payload;
        }
        self.sequence.store(sequence.get(), Ordering::Release);
    }

    /// Reset to the benign default and mark the slot free. Returns
    /// `false` (no-op) if the slot was already free — this is the
    /// double-release guard described in §3.
    pub(crate) fn release(&self) -> bool {
        if self.sequence.swap(0, Ordering::AcqRel) == 0 {
            // Already free: undo the swap-to-0 no-op (it was already 0)
            // and signal the caller this was a double release.
            return false;
        }
        // SAFETY: we just proved we were the one transitioning this slot
        // from live to free; no other thread observes it as live anymore.
        unsafe {
            *self.slot.get() = Slot::default();
        }
        true
    }
}
