//! Actor identity, state machine, and behavior dispatch (§4.4).
//!
//! An actor is a [`cell::ActorCell`]: an id, an atomic [`lifecycle::ActorState`],
//! a [`crate::mailbox::Mailbox`], and a boxed [`traits::Behavior`]. Workers in
//! [`crate::scheduler`] drive a cell's `run_quantum` to completion of a bounded
//! batch; [`context::Context`] is what the behavior sees while running.

pub mod cell;
pub mod context;
pub mod lifecycle;
pub mod traits;

pub use cell::{ActorCell, QuantumOutcome};
pub use context::Context;
pub use lifecycle::{ActorState, AtomicActorState};
pub use traits::{Behavior, BehaviorError};
