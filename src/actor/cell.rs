//! The actor record: identity, state, mailbox, and behavior dispatch (§3, §4.4).

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tracing::warn;

// Layer 3: Internal module imports
use crate::actor::context::Context;
use crate::actor::lifecycle::{ActorState, AtomicActorState};
use crate::actor::traits::{Behavior, BehaviorError};
use crate::mailbox::Mailbox;
use crate::message::Kind;
use crate::system::ActorSystem;
use crate::util::ActorId;

/// What happened during one call to [`ActorCell::run_quantum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantumOutcome {
    /// The mailbox was drained and the actor has nothing left to do
    /// (or is no longer `Running`); it should not be rescheduled.
    Idle,
    /// The quantum bound (message count or wall clock) was hit while
    /// messages remained; the actor must be rescheduled.
    MoreWork,
    /// `receive` returned an error; the actor transitioned to `Failed`
    /// and the supervisor must be notified.
    Failed,
}

/// Capacity of an actor's control mailbox (`System*`/`Control*` kinds).
/// Kept separate from the user mailbox so lifecycle signals such as
/// `Resume` are never blocked behind a full user inbox (§4.4).
const CONTROL_MAILBOX_CAPACITY: usize = 64;

/// The actor record: identity, atomic state, mailbox, and the boxed
/// user behavior. Exactly one worker drains a given cell at a time,
/// enforced by the scheduled flag plus single-pop discipline above
/// this type (§9).
pub struct ActorCell {
    id: ActorId,
    name: String,
    state: AtomicActorState,
    mailbox: Mailbox,
    control: Mailbox,
    behavior: Mutex<Box<dyn Behavior>>,
    scheduled: AtomicBool,
    /// The error that triggered the pending restart, set by [`Self::fail`]
    /// and consumed by the `SystemRestart` handler so `pre_restart` sees
    /// the real failure reason instead of a placeholder.
    last_failure: Mutex<Option<BehaviorError>>,
}

impl ActorCell {
    pub fn new(id: ActorId, name: String, mailbox_capacity: usize, behavior: Box<dyn Behavior>) -> Self {
        Self {
            id,
            name,
            state: AtomicActorState::new(ActorState::Created),
            mailbox: Mailbox::new(mailbox_capacity),
            control: Mailbox::new(CONTROL_MAILBOX_CAPACITY),
            behavior: Mutex::new(behavior),
            scheduled: AtomicBool::new(false),
            last_failure: Mutex::new(None),
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ActorState {
        self.state.load()
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// The separate inbox for `System*`/`Control*` messages (§4.4).
    pub(crate) fn control_mailbox(&self) -> &Mailbox {
        &self.control
    }

    /// Flip the scheduled flag `false -> true`. Returns `true` if this
    /// call won the flip and the caller should actually enqueue the
    /// actor; `false` means it was already scheduled (§4.5 dedup).
    pub fn try_mark_scheduled(&self) -> bool {
        self.scheduled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Clear the scheduled flag. Only the worker that just finished a
    /// quantum with an empty mailbox may call this (§9).
    pub fn mark_unscheduled(&self) {
        self.scheduled.store(false, Ordering::Release);
    }

    /// Drain the control mailbox fully, then up to `max_msgs` user
    /// messages (or until `quantum` elapses), dispatching each through
    /// the user behavior's `receive` (§4.4).
    ///
    /// Control messages (`System*`/`Control*`) always run, regardless
    /// of lifecycle state, so `Resume` can never be stuck behind a full
    /// or blocked user mailbox. While the actor is in a dispatch-blocked
    /// state (`Suspended`, `Stopped`, `Failed`), user messages are left
    /// queued rather than drained and dropped.
    pub fn run_quantum(
        &self,
        system: &ActorSystem,
        max_msgs: usize,
        quantum: Duration,
    ) -> QuantumOutcome {
        let started = Instant::now();
        let mut cbuf = [0usize; 1];
        while self.control.recv_batch(&mut cbuf) != 0 {
            let slot = cbuf[0];
            let kind = system.pool().envelope(slot).kind();
            self.handle_system_message(system, slot, kind);
            system.pool().release(slot);
        }

        if self.state().blocks_dispatch() {
            return QuantumOutcome::Idle;
        }

        let mut processed = 0usize;
        let mut buf = [0usize; 1];
        while processed < max_msgs && started.elapsed() < quantum {
            if self.mailbox.recv_batch(&mut buf) == 0 {
                break;
            }
            let slot = buf[0];
            let outcome = self.dispatch_one(system, slot);
            system.pool().release(slot);
            processed += 1;
            if outcome == QuantumOutcome::Failed {
                return QuantumOutcome::Failed;
            }
        }

        if !self.mailbox.is_empty() && self.state() == ActorState::Running {
            QuantumOutcome::MoreWork
        } else {
            QuantumOutcome::Idle
        }
    }

    fn dispatch_one(&self, system: &ActorSystem, slot: usize) -> QuantumOutcome {
        let mut ctx = Context::new(self.id, system);
        let env = system.pool().envelope(slot);
        let result = {
            let mut behavior = self.behavior.lock();
            behavior.receive(env, &mut ctx)
        };
        match result {
            Ok(()) => QuantumOutcome::Idle,
            Err(err) => {
                self.fail(system, err);
                QuantumOutcome::Failed
            }
        }
    }

    fn handle_system_message(&self, system: &ActorSystem, slot: usize, kind: Kind) {
        match kind {
            Kind::SystemStart => {
                if self.state.compare_exchange(ActorState::Created, ActorState::Running) {
                    let mut ctx = Context::new(self.id, system);
                    let mut behavior = self.behavior.lock();
                    behavior.pre_start(&mut ctx);
                }
            }
            Kind::SystemStop | Kind::ControlShutdown => {
                self.state.store(ActorState::Stopping);
                let mut ctx = Context::new(self.id, system);
                let mut behavior = self.behavior.lock();
                behavior.post_stop(&mut ctx);
                drop(behavior);
                self.state.store(ActorState::Stopped);

                // Stopped never drains the user mailbox again, so any
                // envelope left queued here would leak out of the pool
                // forever. Release them unprocessed.
                let mut buf = [0usize; 1];
                while self.mailbox.recv_batch(&mut buf) != 0 {
                    system.pool().release(buf[0]);
                }
            }
            Kind::SystemRestart => {
                let mut ctx = Context::new(self.id, system);
                // The failure that triggered this restart, if any (a
                // direct `ActorRef::restart()` call has none).
                let reason = self
                    .last_failure
                    .lock()
                    .take()
                    .unwrap_or_else(|| BehaviorError::new(RestartRequested));
                {
                    let mut behavior = self.behavior.lock();
                    behavior.pre_restart(&mut ctx, &reason);
                }
                self.state.store(ActorState::Restarting);
                {
                    let mut behavior = self.behavior.lock();
                    behavior.post_restart(&mut ctx);
                }
                self.state.store(ActorState::Running);
            }
            Kind::SystemPing => {
                // §4.4 Open Question 1: answered automatically by the
                // actor core, not left to user code.
                let env = system.pool().envelope(slot);
                let sender = env.sender_id();
                if sender.is_some() {
                    if let Err(e) = system.send_system(sender, self.id, Kind::SystemPong) {
                        warn!(actor = %self.id, error = %e, "failed to answer Ping with Pong");
                    }
                }
            }
            Kind::SystemPong => {
                // Inert.
            }
            Kind::ControlSuspend => self.state.store(ActorState::Suspended),
            Kind::ControlResume => {
                let _ = self
                    .state
                    .compare_exchange(ActorState::Suspended, ActorState::Running);
            }
            Kind::UserString | Kind::UserInt | Kind::UserFloat | Kind::UserBlob => {
                unreachable!("user kinds never reach handle_system_message")
            }
        }
    }

    fn fail(&self, system: &ActorSystem, err: BehaviorError) {
        warn!(actor = %self.id, error = %err, "actor behavior failed, transitioning to Failed");
        self.state.store(ActorState::Failed);
        system.notify_failure(self.id, &err);
        *self.last_failure.lock() = Some(err);
    }
}

#[derive(Debug, thiserror::Error)]
#[error("restart requested")]
struct RestartRequested;

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;
    impl Behavior for Echo {
        fn receive(&mut self, _env: &crate::message::Envelope, _ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
            Ok(())
        }
    }

    #[test]
    fn scheduled_flag_dedups() {
        let cell = ActorCell::new(ActorId::from_raw(1), "echo".into(), 8, Box::new(Echo));
        assert!(cell.try_mark_scheduled());
        assert!(!cell.try_mark_scheduled());
        cell.mark_unscheduled();
        assert!(cell.try_mark_scheduled());
    }

    #[test]
    fn starts_created() {
        let cell = ActorCell::new(ActorId::from_raw(1), "echo".into(), 8, Box::new(Echo));
        assert_eq!(cell.state(), ActorState::Created);
    }
}
