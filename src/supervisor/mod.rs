//! Restart policy and failure handling for supervised actors (§4.6, §4.7).
//!
//! A single [`Supervisor`] lives inside the [`crate::system::ActorSystem`]
//! and tracks every spawned actor as a flat registry of children. On
//! failure it consults the actor's [`types::ChildRecord`] (restart count,
//! last restart time, next backoff), applies the restart-window and
//! restart-limit rules, and carries out the configured
//! [`strategy::SupervisorStrategy`].

pub mod backoff;
pub mod strategy;
pub mod timer;
pub mod types;

pub use backoff::RestartBackoff;
pub use strategy::SupervisorStrategy;
pub use types::{ChildRecord, SupervisorConfig};

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tracing::{info, warn};

// Layer 3: Internal module imports
use crate::actor::BehaviorError;
use crate::message::Kind;
use crate::monitoring::SupervisorEventKind;
use crate::supervisor::timer::RestartTimer;
use crate::system::{ActorSystem, SystemError};
use crate::util::ActorId;

/// Registry of supervised actors plus the restart-handling logic applied
/// on failure.
pub struct Supervisor {
    config: SupervisorConfig,
    children: Mutex<HashMap<ActorId, ChildRecord>>,
    timer: RestartTimer,
    restarts_issued: AtomicU64,
}

impl Supervisor {
    /// Construct the registry. The restart-timer thread isn't spawned
    /// yet — call [`Self::start_timer`] once an [`ActorSystem`] exists
    /// to hand it, matching [`crate::scheduler::Scheduler`]'s
    /// construct-then-start split.
    pub fn new(config: SupervisorConfig) -> Self {
        Self {
            config,
            children: Mutex::new(HashMap::new()),
            timer: RestartTimer::new(),
            restarts_issued: AtomicU64::new(0),
        }
    }

    /// Spawn the restart-timer thread. Called from
    /// [`ActorSystem::start`] once the system handle it needs exists.
    pub(crate) fn start_timer(&self, system: ActorSystem) -> Result<(), SystemError> {
        self.timer.start(system)
    }

    /// Total number of restarts scheduled since construction, for the
    /// system statistics snapshot (§3.1).
    pub fn restarts_issued(&self) -> u64 {
        self.restarts_issued.load(Ordering::Relaxed)
    }

    /// Track a newly spawned actor. `parent` is only meaningful for
    /// `Escalate`, which currently has nowhere to escalate to in this
    /// single flat registry and falls back to `Stop` (see DESIGN.md).
    pub fn register(&self, actor: ActorId, parent: Option<ActorId>) {
        let mut children = self.children.lock();
        children.insert(actor, ChildRecord::new(actor, parent, &self.config));
    }

    pub fn unregister(&self, actor: ActorId) {
        self.children.lock().remove(&actor);
    }

    pub fn is_registered(&self, actor: ActorId) -> bool {
        self.children.lock().contains_key(&actor)
    }

    /// Handle a child's failure (§4.6). Looks up its restart record,
    /// applies the window/limit rules, and dispatches the configured
    /// strategy.
    pub fn on_failure(&self, system: &ActorSystem, actor: ActorId, err: &BehaviorError) {
        warn!(actor = %actor, error = %err, "supervisor handling child failure");

        let now = Instant::now();
        // spec.md:156 — check the budget *before* committing to another
        // restart: `if restart_count >= max_restarts, downgrade to Stop;
        // otherwise record a restart`. Checking after recording would
        // count the restart that triggers the downgrade against its own
        // budget (off by one).
        let recorded = {
            let mut children = self.children.lock();
            let Some(record) = children.get_mut(&actor) else {
                warn!(actor = %actor, "failure reported for unregistered actor");
                return;
            };
            if record.backoff.would_exceed_limit(now) {
                None
            } else {
                let delay = record.backoff.record_restart(now);
                Some((delay, record.backoff.restart_count()))
            }
        };

        let (strategy, delay, restart_count) = match recorded {
            Some((delay, restart_count)) => (self.config.strategy, delay, restart_count),
            None => {
                info!(actor = %actor, max_restarts = self.config.max_restarts, "restart limit exceeded, downgrading to stop");
                (downgrade_to_stop(self.config.strategy), Duration::ZERO, 0)
            }
        };

        self.apply(system, actor, strategy, delay, restart_count);
    }

    fn apply(
        &self,
        system: &ActorSystem,
        actor: ActorId,
        strategy: SupervisorStrategy,
        delay: std::time::Duration,
        restart_count: u32,
    ) {
        match strategy {
            SupervisorStrategy::Restart => {
                self.timer.schedule(actor, delay);
                self.restarts_issued.fetch_add(1, Ordering::Relaxed);
                system.record_supervisor_event(actor, SupervisorEventKind::BackoffScheduled { delay });
                system.record_supervisor_event(actor, SupervisorEventKind::Restarted { restart_count });
            }
            SupervisorStrategy::Stop => {
                self.send_stop(system, actor);
                self.unregister(actor);
                system.record_supervisor_event(actor, SupervisorEventKind::Stopped);
            }
            SupervisorStrategy::RestartAll => {
                for other in self.all_children() {
                    self.timer.schedule(other, delay);
                    self.restarts_issued.fetch_add(1, Ordering::Relaxed);
                    system.record_supervisor_event(other, SupervisorEventKind::BackoffScheduled { delay });
                    system.record_supervisor_event(other, SupervisorEventKind::Restarted { restart_count });
                }
            }
            SupervisorStrategy::StopAll => {
                for other in self.all_children() {
                    self.send_stop(system, other);
                    system.record_supervisor_event(other, SupervisorEventKind::Stopped);
                }
                self.children.lock().clear();
            }
            SupervisorStrategy::Escalate => {
                let parent = self.children.lock().get(&actor).and_then(|r| r.parent);
                match parent {
                    // This flat registry has no separate parent supervisor
                    // to hand the failure to; escalation bottoms out as Stop.
                    Some(_) | None => {
                        system.record_supervisor_event(actor, SupervisorEventKind::Escalated);
                        self.send_stop(system, actor);
                        self.unregister(actor);
                        system.record_supervisor_event(actor, SupervisorEventKind::Stopped);
                    }
                }
            }
        }
    }

    fn all_children(&self) -> Vec<ActorId> {
        self.children.lock().keys().copied().collect()
    }

    fn send_stop(&self, system: &ActorSystem, actor: ActorId) {
        if let Err(e) = system.send_system(actor, ActorId::NONE, Kind::SystemStop) {
            warn!(actor = %actor, error = %e, "failed to send stop to supervised child");
        }
    }
}

fn downgrade_to_stop(strategy: SupervisorStrategy) -> SupervisorStrategy {
    match strategy {
        SupervisorStrategy::Restart | SupervisorStrategy::Stop => SupervisorStrategy::Stop,
        SupervisorStrategy::RestartAll | SupervisorStrategy::StopAll => SupervisorStrategy::StopAll,
        SupervisorStrategy::Escalate => SupervisorStrategy::Escalate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downgrade_maps_restart_variants_to_their_stop_counterpart() {
        assert_eq!(downgrade_to_stop(SupervisorStrategy::Restart), SupervisorStrategy::Stop);
        assert_eq!(
            downgrade_to_stop(SupervisorStrategy::RestartAll),
            SupervisorStrategy::StopAll
        );
        assert_eq!(downgrade_to_stop(SupervisorStrategy::Stop), SupervisorStrategy::Stop);
    }
}
