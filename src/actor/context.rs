//! The handle passed into every user behavior hook (§4.4, §6).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::traits::Behavior;
use crate::message::Kind;
use crate::system::{ActorRef, ActorSystem, SystemError};
use crate::util::ActorId;

/// Passed by reference into `receive` and the lifecycle hooks. Exposes
/// just enough of the system for a behavior to address itself, spawn
/// children, and reach the owning `ActorSystem`.
pub struct Context<'a> {
    self_id: ActorId,
    system: &'a ActorSystem,
}

impl<'a> Context<'a> {
    pub(crate) fn new(self_id: ActorId, system: &'a ActorSystem) -> Self {
        Self { self_id, system }
    }

    /// A handle to the actor this context belongs to. `None` if the
    /// registry entry was already removed — e.g. a supervisor can
    /// unregister a stopping actor before its own `post_stop` hook runs.
    pub fn self_ref(&self) -> Option<ActorRef> {
        self.system.find(self.self_id)
    }

    /// The owning system.
    pub fn system(&self) -> &ActorSystem {
        self.system
    }

    /// Spawn a new actor as a sibling in the same system.
    pub fn spawn_child<B: Behavior + 'static>(&self, behavior: B) -> Result<ActorRef, SystemError> {
        self.system.spawn(behavior)
    }

    /// Send `target` a `Ping` with this actor as the reply address. The
    /// target's actor core answers automatically with a `Pong` (§4.4
    /// Open Question 1).
    pub fn ping(&self, target: ActorId) -> Result<(), SystemError> {
        self.system.send_system(target, self.self_id, Kind::SystemPing)
    }
}
