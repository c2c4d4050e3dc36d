//! `ActorSystem` and `ActorRef`: the glue that owns the pool, registry,
//! scheduler, and supervisor (§4.7).

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info, warn};

// Layer 3: Internal module imports
use crate::actor::{ActorCell, ActorState, Behavior, BehaviorError};
use crate::message::{IntoPayload, Kind, Payload, Pool};
use crate::monitoring::{
    ActorEvent, ActorEventKind, MailboxEvent, MailboxEventKind, Monitor, NoopMonitor,
    SchedulerEvent, SchedulerEventKind, SupervisorEvent, SupervisorEventKind,
};
use crate::scheduler::{Scheduler, SchedulerConfig, SchedulerStats};
use crate::supervisor::Supervisor;
use crate::system::{SystemConfig, SystemError};
use crate::util::{ActorId, ActorIdGenerator};

/// Per-state actor counts for the statistics snapshot (§3.1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorStateCounts {
    pub created: usize,
    pub running: usize,
    pub suspended: usize,
    pub stopping: usize,
    pub stopped: usize,
    pub failed: usize,
    pub restarting: usize,
}

/// Read-only snapshot of system-wide statistics (§3.1, §6).
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    pub actor_count: usize,
    pub actors_by_state: ActorStateCounts,
    pub messages_sent: u64,
    pub messages_received: u64,
    pub messages_dropped: u64,
    pub messages_failed: u64,
    pub pool_free: usize,
    pub pool_capacity: usize,
    pub scheduler: SchedulerStats,
    pub supervisor_restarts: u64,
}

struct Inner {
    name: String,
    config: SystemConfig,
    pool: Pool,
    registry: DashMap<ActorId, Arc<ActorCell>>,
    id_gen: ActorIdGenerator,
    scheduler: Scheduler,
    supervisor: Supervisor,
    started: AtomicBool,
    stopping: AtomicBool,
    messages_failed: AtomicU64,
    actor_monitor: Arc<dyn Monitor<ActorEvent>>,
    mailbox_monitor: Arc<dyn Monitor<MailboxEvent>>,
    scheduler_monitor: Arc<dyn Monitor<SchedulerEvent>>,
    supervisor_monitor: Arc<dyn Monitor<SupervisorEvent>>,
}

/// Owns the message pool, actor registry, scheduler, and supervisor
/// (§2 component G). Cheap to clone — every clone shares the same
/// `Arc<Inner>` — so workers, the restart timer, and user code can all
/// hold a handle.
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<Inner>,
}

impl ActorSystem {
    /// Construct a system from `config`, wiring a default (no-op) sink
    /// into each of the four monitoring slots. Use
    /// [`ActorSystem::with_monitors`] to supply real ones.
    pub fn new(name: impl Into<String>, config: SystemConfig) -> Self {
        Self::with_monitors(
            name,
            config,
            Arc::new(NoopMonitor::new()),
            Arc::new(NoopMonitor::new()),
            Arc::new(NoopMonitor::new()),
            Arc::new(NoopMonitor::new()),
        )
    }

    /// Construct a system with explicit monitoring sinks for each of the
    /// four event types (§3.1, §9).
    pub fn with_monitors(
        name: impl Into<String>,
        config: SystemConfig,
        actor_monitor: Arc<dyn Monitor<ActorEvent>>,
        mailbox_monitor: Arc<dyn Monitor<MailboxEvent>>,
        scheduler_monitor: Arc<dyn Monitor<SchedulerEvent>>,
        supervisor_monitor: Arc<dyn Monitor<SupervisorEvent>>,
    ) -> Self {
        let supervisor_config = config.supervisor.clone();
        let scheduler_config = SchedulerConfig {
            worker_threads: config.worker_threads,
            max_messages_per_quantum: config.max_messages_per_quantum,
            quantum: config.quantum,
            enable_work_stealing: config.enable_work_stealing,
            ..SchedulerConfig::default()
        };
        let pool = Pool::new(config.message_pool_capacity);

        let inner = Arc::new(Inner {
            name: name.into(),
            pool,
            registry: DashMap::new(),
            id_gen: ActorIdGenerator::new(),
            scheduler: Scheduler::new(scheduler_config),
            supervisor: Supervisor::new(supervisor_config),
            started: AtomicBool::new(false),
            stopping: AtomicBool::new(false),
            messages_failed: AtomicU64::new(0),
            actor_monitor,
            mailbox_monitor,
            scheduler_monitor,
            supervisor_monitor,
            config,
        });

        Self { inner }
    }

    /// Start the scheduler's worker threads and the supervisor's restart
    /// timer. Idempotent. Fails only if the underlying OS refuses to
    /// spawn a thread.
    pub fn start(&self) -> Result<(), SystemError> {
        if self.inner.started.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.inner.scheduler.start(self.clone())?;
        self.inner.supervisor.start_timer(self.clone())?;
        info!(system = %self.inner.name, workers = self.inner.scheduler.worker_count(), "actor system started");
        Ok(())
    }

    /// Allocate an actor, register it with the supervisor, and enqueue a
    /// `Start` system message so `pre_start` runs on a worker (§4.7).
    pub fn spawn<B: Behavior + 'static>(&self, behavior: B) -> Result<ActorRef, SystemError> {
        if self.inner.stopping.load(Ordering::Acquire) {
            return Err(SystemError::ShuttingDown);
        }

        let max = self.inner.config.max_actors;
        if max != 0 && self.inner.registry.len() >= max {
            return Err(SystemError::ActorLimitExceeded {
                current: self.inner.registry.len(),
                max,
            });
        }

        let id = self.inner.id_gen.next();
        let name = format!("actor-{}", id.as_raw());
        let cell = Arc::new(ActorCell::new(
            id,
            name,
            self.inner.config.mailbox_capacity,
            Box::new(behavior),
        ));
        self.inner.registry.insert(id, cell.clone());
        self.supervisor().register(id, None);
        self.record_actor_event(id, ActorEventKind::Created);

        self.send_system(id, ActorId::NONE, Kind::SystemStart)?;

        Ok(ActorRef::new(id, cell, self.clone()))
    }

    /// Look up a live actor by id.
    pub fn find(&self, id: ActorId) -> Option<ActorRef> {
        self.inner
            .registry
            .get(&id)
            .map(|entry| ActorRef::new(id, entry.value().clone(), self.clone()))
    }

    /// Send the same user message to every registered actor. Per-actor
    /// failures (full mailbox, pool exhaustion) are logged and skipped
    /// rather than aborting the whole broadcast.
    pub fn broadcast<T: IntoPayload + Clone>(&self, msg: T) {
        let ids: Vec<ActorId> = self.inner.registry.iter().map(|e| *e.key()).collect();
        for id in ids {
            let payload = msg.clone().into_payload();
            let kind = payload.user_kind();
            if let Err(err) = self.dispatch(id, ActorId::NONE, kind, payload) {
                debug!(actor = %id, error = %err, "broadcast send skipped");
            }
        }
    }

    /// Send a system-level message (§3, §4.4). Used internally by
    /// `spawn`, the supervisor, and the restart timer.
    pub fn send_system(&self, to: ActorId, from: ActorId, kind: Kind) -> Result<(), SystemError> {
        self.dispatch(to, from, kind, Payload::None)
    }

    /// A read-only snapshot of system statistics (§3.1).
    pub fn stats(&self) -> SystemSnapshot {
        let mut counts = ActorStateCounts::default();
        let (mut sent, mut received, mut dropped) = (0u64, 0u64, 0u64);

        for entry in self.inner.registry.iter() {
            let cell = entry.value();
            match cell.state() {
                ActorState::Created => counts.created += 1,
                ActorState::Running => counts.running += 1,
                ActorState::Suspended => counts.suspended += 1,
                ActorState::Stopping => counts.stopping += 1,
                ActorState::Stopped => counts.stopped += 1,
                ActorState::Failed => counts.failed += 1,
                ActorState::Restarting => counts.restarting += 1,
            }
            sent += cell.mailbox().sent();
            received += cell.mailbox().received();
            dropped += cell.mailbox().dropped();
        }

        SystemSnapshot {
            actor_count: self.inner.registry.len(),
            actors_by_state: counts,
            messages_sent: sent,
            messages_received: received,
            messages_dropped: dropped,
            messages_failed: self.inner.messages_failed.load(Ordering::Relaxed),
            pool_free: self.inner.pool.free_count(),
            pool_capacity: self.inner.pool.capacity(),
            scheduler: self.inner.scheduler.stats(),
            supervisor_restarts: self.supervisor().restarts_issued(),
        }
    }

    /// Stop accepting new work, signal every actor to stop, wait up to
    /// `timeout` for mailboxes to drain, then join the scheduler (§4.5).
    pub fn shutdown(&self, timeout: Duration) -> Result<(), SystemError> {
        self.inner.stopping.store(true, Ordering::Release);

        let ids: Vec<ActorId> = self.inner.registry.iter().map(|e| *e.key()).collect();
        for id in &ids {
            let _ = self.send_system(*id, ActorId::NONE, Kind::SystemStop);
        }

        let deadline = Instant::now() + timeout;
        loop {
            let drained = self
                .inner
                .registry
                .iter()
                .all(|e| e.value().state().is_terminal());
            if drained {
                break;
            }
            if Instant::now() >= deadline {
                self.inner.scheduler.stop();
                self.inner.scheduler.join();
                warn!(system = %self.inner.name, "shutdown timed out before all actors drained");
                return Err(SystemError::ShutdownTimeout(timeout));
            }
            std::thread::sleep(Duration::from_millis(1));
        }

        self.inner.scheduler.stop();
        self.inner.scheduler.join();
        info!(system = %self.inner.name, "actor system shut down");
        Ok(())
    }

    pub(crate) fn pool(&self) -> &Pool {
        &self.inner.pool
    }

    /// Route a failure to the supervisor and bump the failure counter.
    /// Called by [`ActorCell`] when a behavior's `receive` returns `Err`.
    pub(crate) fn notify_failure(&self, id: ActorId, err: &BehaviorError) {
        self.inner.messages_failed.fetch_add(1, Ordering::Relaxed);
        self.record_actor_event(
            id,
            ActorEventKind::Failed {
                reason: err.to_string(),
            },
        );
        self.supervisor().on_failure(self, id, err);
    }

    pub(crate) fn record_scheduler_event(&self, worker_id: Option<usize>, kind: SchedulerEventKind) {
        let event = SchedulerEvent {
            timestamp: Utc::now(),
            worker_id,
            kind,
            metadata: HashMap::new(),
        };
        if let Err(e) = self.inner.scheduler_monitor.record(event) {
            debug!(error = %e, "scheduler monitor record failed");
        }
    }

    pub(crate) fn record_supervisor_event(&self, actor_id: ActorId, kind: SupervisorEventKind) {
        let event = SupervisorEvent {
            timestamp: Utc::now(),
            actor_id,
            kind,
            metadata: HashMap::new(),
        };
        if let Err(e) = self.inner.supervisor_monitor.record(event) {
            debug!(error = %e, "supervisor monitor record failed");
        }
    }

    fn supervisor(&self) -> &Supervisor {
        &self.inner.supervisor
    }

    fn dispatch(&self, to: ActorId, from: ActorId, kind: Kind, payload: Payload) -> Result<(), SystemError> {
        let cell = self
            .inner
            .registry
            .get(&to)
            .map(|e| e.value().clone())
            .ok_or(SystemError::ActorNotFound(to))?;

        let slot = self
            .inner
            .pool
            .acquire(kind, to, from, payload)
            .map_err(|_| SystemError::PoolExhausted)?;

        // System/control kinds use a dedicated mailbox so lifecycle
        // signals (notably Resume) are never stuck behind a full or
        // dispatch-blocked user inbox (§4.4).
        let target_mailbox = if kind.is_system() || kind.is_control() {
            cell.control_mailbox()
        } else {
            cell.mailbox()
        };

        if target_mailbox.send(slot).is_err() {
            self.inner.pool.release(slot);
            self.record_mailbox_event(
                to,
                MailboxEventKind::Dropped {
                    reason: "mailbox full".to_string(),
                },
            );
            return Err(SystemError::MailboxFull(to));
        }
        self.record_mailbox_event(
            to,
            MailboxEventKind::Enqueued {
                queue_size: target_mailbox.len(),
            },
        );

        if cell.try_mark_scheduled() {
            if kind.is_system() || kind.is_control() {
                self.inner.scheduler.submit_hi(cell);
            } else {
                self.inner.scheduler.submit(cell);
            }
        }

        Ok(())
    }

    fn record_actor_event(&self, actor_id: ActorId, kind: ActorEventKind) {
        let event = ActorEvent {
            timestamp: Utc::now(),
            actor_id,
            kind,
            metadata: HashMap::new(),
        };
        if let Err(e) = self.inner.actor_monitor.record(event) {
            debug!(error = %e, "actor monitor record failed");
        }
    }

    fn record_mailbox_event(&self, actor_id: ActorId, kind: MailboxEventKind) {
        let event = MailboxEvent {
            timestamp: Utc::now(),
            actor_id,
            kind,
            metadata: HashMap::new(),
        };
        if let Err(e) = self.inner.mailbox_monitor.record(event) {
            debug!(error = %e, "mailbox monitor record failed");
        }
    }
}

/// A stable, by-value handle to a live actor (§6, §9). Holds a strong
/// reference to the actor's cell (mailbox + state live exactly as long
/// as the system does) plus a handle back to the system for routing
/// sends.
#[derive(Clone)]
pub struct ActorRef {
    id: ActorId,
    cell: Arc<ActorCell>,
    system: ActorSystem,
}

impl ActorRef {
    fn new(id: ActorId, cell: Arc<ActorCell>, system: ActorSystem) -> Self {
        Self { id, cell, system }
    }

    /// Send a user message, tagging it with the `Kind` that matches the
    /// value's payload shape.
    pub fn send_user<T: IntoPayload>(&self, msg: T) -> Result<(), SystemError> {
        let payload = msg.into_payload();
        let kind = payload.user_kind();
        self.system.dispatch(self.id, ActorId::NONE, kind, payload)
    }

    /// Send a `System*` message (`Start`, `Stop`, `Restart`, `Ping`, `Pong`).
    pub fn send_system(&self, kind: Kind) -> Result<(), SystemError> {
        self.system.send_system(self.id, ActorId::NONE, kind)
    }

    /// Send a `Control*` message (`Shutdown`, `Suspend`, `Resume`).
    pub fn send_control(&self, kind: Kind) -> Result<(), SystemError> {
        self.system.send_system(self.id, ActorId::NONE, kind)
    }

    /// Send this actor a `Ping` with `from` as the reply address. The
    /// actor core answers automatically with a `Pong` to `from` (§4.4
    /// Open Question 1) — user behaviors never see `Ping` themselves.
    pub fn ping(&self, from: ActorId) -> Result<(), SystemError> {
        self.system.send_system(self.id, from, Kind::SystemPing)
    }

    /// Request a graceful stop.
    pub fn stop(&self) -> Result<(), SystemError> {
        self.send_system(Kind::SystemStop)
    }

    /// Request a restart (runs `pre_restart`/`post_restart` in place).
    pub fn restart(&self) -> Result<(), SystemError> {
        self.send_system(Kind::SystemRestart)
    }

    /// The actor's current lifecycle state.
    pub fn state(&self) -> ActorState {
        self.cell.state()
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    /// `true` unless the actor has reached a terminal state (§4.4).
    pub fn alive(&self) -> bool {
        !self.cell.state().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Context;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    struct Echo {
        received: Arc<AtomicUsize>,
    }

    impl Behavior for Echo {
        fn receive(&mut self, _env: &crate::message::Envelope, _ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
            self.received.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    struct FailsOnSecond {
        count: usize,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Behavior for FailsOnSecond {
        fn receive(&mut self, _env: &crate::message::Envelope, _ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
            self.count += 1;
            if self.count == 2 {
                return Err(BehaviorError::new(std::io::Error::other("boom")));
            }
            Ok(())
        }

        fn pre_restart(&mut self, _ctx: &mut Context<'_>, _reason: &BehaviorError) {
            self.log.lock().unwrap().push("pre_restart");
        }

        fn post_restart(&mut self, _ctx: &mut Context<'_>) {
            self.count = 0;
            self.log.lock().unwrap().push("post_restart");
        }
    }

    fn test_config() -> SystemConfig {
        SystemConfig::builder()
            .with_worker_threads(2)
            .with_mailbox_capacity(16)
            .with_message_pool_capacity(64)
            .build()
            .unwrap()
    }

    #[test]
    fn spawn_assigns_a_distinct_id_per_actor() {
        let system = ActorSystem::new("test", test_config());
        system.start().unwrap();
        let received = Arc::new(AtomicUsize::new(0));
        let a = system.spawn(Echo { received: received.clone() }).unwrap();
        let b = system.spawn(Echo { received }).unwrap();
        assert_ne!(a.id(), b.id());
        system.shutdown(Duration::from_secs(1)).unwrap();
    }

    #[test]
    fn echo_actor_processes_sent_messages() {
        let system = ActorSystem::new("echo", test_config());
        system.start().unwrap();
        let received = Arc::new(AtomicUsize::new(0));
        let actor = system.spawn(Echo { received: received.clone() }).unwrap();

        actor.send_user(1i64).unwrap();
        actor.send_user(2i64).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while received.load(Ordering::Relaxed) < 2 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(received.load(Ordering::Relaxed), 2);
        system.shutdown(Duration::from_secs(1)).unwrap();
    }

    #[test]
    fn find_returns_none_for_unknown_actor() {
        let system = ActorSystem::new("lookup", test_config());
        assert!(system.find(ActorId::from_raw(999)).is_none());
    }

    #[test]
    fn spawn_beyond_max_actors_is_rejected() {
        let config = SystemConfig::builder()
            .with_worker_threads(1)
            .with_max_actors(1)
            .build()
            .unwrap();
        let system = ActorSystem::new("bounded", config);
        let received = Arc::new(AtomicUsize::new(0));
        system.spawn(Echo { received: received.clone() }).unwrap();
        let err = system.spawn(Echo { received }).unwrap_err();
        assert!(matches!(err, SystemError::ActorLimitExceeded { .. }));
    }

    #[test]
    fn restart_on_failure_resets_behavior_and_resumes_processing() {
        let system = ActorSystem::new("restart", test_config());
        system.start().unwrap();
        let log = Arc::new(Mutex::new(Vec::new()));
        let actor = system
            .spawn(FailsOnSecond { count: 0, log: log.clone() })
            .unwrap();

        actor.send_user(1i64).unwrap();
        actor.send_user(2i64).unwrap();
        actor.send_user(3i64).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while log.lock().unwrap().len() < 2 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(*log.lock().unwrap(), vec!["pre_restart", "post_restart"]);
        system.shutdown(Duration::from_secs(1)).unwrap();
    }

    #[test]
    fn shutdown_joins_workers_within_timeout() {
        let system = ActorSystem::new("shutdown", test_config());
        system.start().unwrap();
        let received = Arc::new(AtomicUsize::new(0));
        system.spawn(Echo { received }).unwrap();

        let started = Instant::now();
        system.shutdown(Duration::from_secs(1)).unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn stats_report_registered_actor_count() {
        let system = ActorSystem::new("stats", test_config());
        let received = Arc::new(AtomicUsize::new(0));
        system.spawn(Echo { received }).unwrap();
        let snapshot = system.stats();
        assert_eq!(snapshot.actor_count, 1);
        assert_eq!(snapshot.pool_capacity, 64);
    }
}
