//! The capability surface a user behavior exposes (§4.4).
//!
//! The actor registry holds heterogeneous behaviors behind a stable
//! `ActorId`-indexed map, which needs one narrow, documented use of
//! `dyn` — the exception the rest of this crate's generic-first style
//! otherwise avoids. `BehaviorError` is therefore a fixed boxed error
//! type rather than an associated type, so `dyn Behavior` stays object
//! safe.

// Layer 1: Standard library imports
use std::error::Error as StdError;
use std::fmt;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::context::Context;
use crate::message::Envelope;

/// Boxed error returned by a behavior's hooks. Carries whatever the
/// user's error type was, type-erased.
pub struct BehaviorError(Box<dyn StdError + Send + Sync + 'static>);

impl BehaviorError {
    pub fn new<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self(Box::new(err))
    }
}

impl fmt::Debug for BehaviorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for BehaviorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for BehaviorError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Capability set an actor's user-defined behavior implements. Only
/// `receive` is required; the lifecycle hooks default to no-ops.
pub trait Behavior: Send {
    /// Handle one user message. Any error is handed to the supervisor
    /// (§4.6); the actor transitions to `Failed`.
    fn receive(&mut self, env: &Envelope, ctx: &mut Context<'_>) -> Result<(), BehaviorError>;

    /// Called once after the actor transitions `Created` → `Running`.
    fn pre_start(&mut self, _ctx: &mut Context<'_>) {}

    /// Called once while transitioning to `Stopped`, after the mailbox
    /// has been drained.
    fn post_stop(&mut self, _ctx: &mut Context<'_>) {}

    /// Called before a restart discards in-flight state.
    fn pre_restart(&mut self, _ctx: &mut Context<'_>, _reason: &BehaviorError) {}

    /// Called after a restart, once the behavior is fresh and the
    /// actor is back to `Running`.
    fn post_restart(&mut self, _ctx: &mut Context<'_>) {}
}
