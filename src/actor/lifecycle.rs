//! The actor state machine (§4.4).
//!
//! ```text
//! Created ──start──▶ Running ──stop──▶ Stopping ──drain──▶ Stopped
//!   │                   │                                    ▲
//!   │                   ├─ctrl:Suspend─▶ Suspended ─Resume──▶│
//!   │                   │
//!   │                   └─failure──▶ Failed ──restart──▶ Restarting ──▶ Running
//!   │
//!   └──────────── terminal error in pre_start ──▶ Failed
//! ```

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU8, Ordering};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// A point in the actor lifecycle graph above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ActorState {
    Created = 0,
    Running = 1,
    Suspended = 2,
    Stopping = 3,
    Stopped = 4,
    Failed = 5,
    Restarting = 6,
}

impl ActorState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => ActorState::Created,
            1 => ActorState::Running,
            2 => ActorState::Suspended,
            3 => ActorState::Stopping,
            4 => ActorState::Stopped,
            5 => ActorState::Failed,
            6 => ActorState::Restarting,
            _ => unreachable!("invalid ActorState discriminant"),
        }
    }

    /// Once reached, no further `receive` may fire without an
    /// intervening restart.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActorState::Stopped | ActorState::Failed)
    }

    /// Dispatch of user messages is blocked in this state (but enqueue
    /// is not, per §4.4).
    pub fn blocks_dispatch(&self) -> bool {
        matches!(self, ActorState::Suspended | ActorState::Stopped | ActorState::Failed)
    }
}

/// Atomic holder for an actor's current [`ActorState`], swapped via
/// compare-and-swap at each transition.
#[derive(Debug)]
pub struct AtomicActorState(AtomicU8);

impl AtomicActorState {
    pub fn new(initial: ActorState) -> Self {
        Self(AtomicU8::new(initial as u8))
    }

    pub fn load(&self) -> ActorState {
        ActorState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, state: ActorState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// Swap in `new` if the current state is `expected`. Returns
    /// `true` on success.
    pub fn compare_exchange(&self, expected: ActorState, new: ActorState) -> bool {
        self.0
            .compare_exchange(
                expected as u8,
                new as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

impl Default for AtomicActorState {
    fn default() -> Self {
        Self::new(ActorState::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_created() {
        let s = AtomicActorState::default();
        assert_eq!(s.load(), ActorState::Created);
    }

    #[test]
    fn terminal_states() {
        assert!(ActorState::Stopped.is_terminal());
        assert!(ActorState::Failed.is_terminal());
        assert!(!ActorState::Running.is_terminal());
    }

    #[test]
    fn suspended_blocks_dispatch_but_is_not_terminal() {
        assert!(ActorState::Suspended.blocks_dispatch());
        assert!(!ActorState::Suspended.is_terminal());
    }

    #[test]
    fn compare_exchange_only_succeeds_on_match() {
        let s = AtomicActorState::new(ActorState::Created);
        assert!(!s.compare_exchange(ActorState::Running, ActorState::Stopped));
        assert_eq!(s.load(), ActorState::Created);
        assert!(s.compare_exchange(ActorState::Created, ActorState::Running));
        assert_eq!(s.load(), ActorState::Running);
    }
}
