//! Worker threads and the submission/work-stealing loop (§4.5).

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

// Layer 3: Internal module imports
use crate::actor::{ActorCell, QuantumOutcome};
use crate::monitoring::SchedulerEventKind;
use crate::queue::MpmcQueue;
use crate::system::{ActorSystem, SystemError};

/// Scheduler tuning knobs (§6).
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Number of worker OS threads. `0` means "use a CPU-count hint".
    pub worker_threads: usize,
    /// Capacity of each worker's local queue.
    pub local_queue_capacity: usize,
    /// Capacity of the global overflow queue.
    pub global_queue_capacity: usize,
    /// Capacity of the high-priority global queue.
    pub global_hi_queue_capacity: usize,
    /// Whether idle workers attempt to steal from peers.
    pub enable_work_stealing: bool,
    /// Max random-peer steal attempts per idle cycle (recommended 3).
    pub steal_attempts: usize,
    /// Per-drain message bound (§4.4).
    pub max_messages_per_quantum: usize,
    /// Per-drain wall-clock bound (§4.4).
    pub quantum: Duration,
    /// How long an idle worker parks before trying again.
    pub park_backoff: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            local_queue_capacity: 256,
            global_queue_capacity: 4096,
            global_hi_queue_capacity: 1024,
            enable_work_stealing: true,
            steal_attempts: 3,
            max_messages_per_quantum: 256,
            quantum: Duration::from_micros(100),
            park_backoff: Duration::from_micros(200),
        }
    }
}

impl SchedulerConfig {
    /// Resolve `worker_threads == 0` to a CPU-count hint, matching the
    /// teacher's topology-detection convention (`num_cpus`).
    pub fn resolved_worker_count(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.worker_threads
        }
    }
}

/// Read-only scheduler statistics for the system snapshot (§3.1, §6).
#[derive(Debug, Clone)]
pub struct SchedulerStats {
    pub local_queue_depths: Vec<usize>,
    pub global_queue_depth: usize,
    pub global_hi_queue_depth: usize,
    pub worker_idle_cycles: Vec<u64>,
}

struct WorkerShared {
    local: Vec<Arc<MpmcQueue<Arc<ActorCell>>>>,
    global: Arc<MpmcQueue<Arc<ActorCell>>>,
    global_hi: Arc<MpmcQueue<Arc<ActorCell>>>,
    running: AtomicBool,
    idle_cycles: Vec<AtomicU64>,
    config: SchedulerConfig,
}

/// The worker pool. Construct with [`Scheduler::new`], hand it to
/// [`Scheduler::start`] once the owning [`ActorSystem`] exists, then
/// [`Scheduler::submit`] actors as they become runnable.
pub struct Scheduler {
    shared: Arc<WorkerShared>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let n = config.resolved_worker_count();
        let local = (0..n)
            .map(|_| Arc::new(MpmcQueue::new(config.local_queue_capacity)))
            .collect();
        let idle_cycles = (0..n).map(|_| AtomicU64::new(0)).collect();
        Self {
            shared: Arc::new(WorkerShared {
                local,
                global: Arc::new(MpmcQueue::new(config.global_queue_capacity)),
                global_hi: Arc::new(MpmcQueue::new(config.global_hi_queue_capacity)),
                running: AtomicBool::new(false),
                idle_cycles,
                config,
            }),
            handles: Mutex::new(Vec::new()),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.shared.local.len()
    }

    /// Enqueue an already-scheduled actor: samples a few local queues
    /// and pushes to the least loaded, falling back to the global queue
    /// on failure. Does not touch the actor's scheduled flag — the
    /// caller decides when that flip happens (§9).
    pub fn submit(&self, cell: Arc<ActorCell>) {
        submit_shared(&self.shared, cell);
    }

    /// Submit to the high-priority queue (system tasks).
    pub fn submit_hi(&self, cell: Arc<ActorCell>) {
        if self.shared.global_hi.push(cell).is_err() {
            debug!("hi-priority scheduler queue full, actor submission dropped");
        }
    }

    /// Spawn the worker threads and start draining. If a thread fails to
    /// spawn partway through, already-spawned workers are stopped and
    /// joined before returning the error, so no thread is left running
    /// behind a pool the caller believes never started.
    pub fn start(&self, system: ActorSystem) -> Result<(), SystemError> {
        self.shared.running.store(true, Ordering::Release);
        let n = self.shared.local.len();
        let mut handles = self.handles.lock();
        for worker_id in 0..n {
            let shared = self.shared.clone();
            let system = system.clone();
            match thread::Builder::new()
                .name(format!("rit-worker-{worker_id}"))
                .spawn(move || worker_loop(worker_id, shared, system))
            {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    self.shared.running.store(false, Ordering::Release);
                    for handle in handles.drain(..) {
                        let _ = handle.join();
                    }
                    return Err(SystemError::Internal(format!(
                        "failed to spawn worker thread {worker_id}: {e}"
                    )));
                }
            }
        }
        info!(workers = n, "scheduler started");
        Ok(())
    }

    /// Flip the running flag; workers finish their current quantum and
    /// exit (§4.5).
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::Release);
    }

    /// Join all worker threads. Call after `stop()`.
    pub fn join(&self) {
        let mut handles = self.handles.lock();
        for h in handles.drain(..) {
            let _ = h.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            local_queue_depths: self.shared.local.iter().map(|q| q.len()).collect(),
            global_queue_depth: self.shared.global.len(),
            global_hi_queue_depth: self.shared.global_hi.len(),
            worker_idle_cycles: self
                .shared
                .idle_cycles
                .iter()
                .map(|c| c.load(Ordering::Relaxed))
                .collect(),
        }
    }
}

fn worker_loop(worker_id: usize, shared: Arc<WorkerShared>, system: ActorSystem) {
    let span = tracing::info_span!("worker", worker_id);
    let _enter = span.enter();
    let mut rng = SmallRng::from_entropy();

    while shared.running.load(Ordering::Acquire) {
        let actor = find_work(worker_id, &shared, &mut rng, &system);
        let Some(cell) = actor else {
            shared.idle_cycles[worker_id].fetch_add(1, Ordering::Relaxed);
            system.record_scheduler_event(Some(worker_id), SchedulerEventKind::Parked);
            thread::park_timeout(shared.config.park_backoff);
            continue;
        };

        trace!(actor = %cell.id(), "draining quantum");
        let outcome = cell.run_quantum(
            &system,
            shared.config.max_messages_per_quantum,
            shared.config.quantum,
        );
        match outcome {
            QuantumOutcome::MoreWork => {
                submit_shared(&shared, cell);
            }
            QuantumOutcome::Idle | QuantumOutcome::Failed => {
                cell.mark_unscheduled();
            }
        }
    }
}

fn submit_shared(shared: &WorkerShared, cell: Arc<ActorCell>) {
    const SAMPLE: usize = 2;
    let n = shared.local.len();
    let mut rng = SmallRng::from_entropy();
    let mut best: Option<usize> = None;
    let mut best_len = usize::MAX;
    for _ in 0..SAMPLE.min(n) {
        let idx = rng.gen_range(0..n);
        let len = shared.local[idx].len();
        if len < best_len {
            best_len = len;
            best = Some(idx);
        }
    }
    if let Some(idx) = best {
        if shared.local[idx].push(cell.clone()).is_ok() {
            return;
        }
    }
    if shared.global.push(cell).is_err() {
        debug!("global scheduler queue full, actor submission dropped");
    }
}

fn find_work(
    worker_id: usize,
    shared: &WorkerShared,
    rng: &mut SmallRng,
    system: &ActorSystem,
) -> Option<Arc<ActorCell>> {
    if let Ok(cell) = shared.local[worker_id].pop() {
        return Some(cell);
    }
    if let Ok(cell) = shared.global_hi.pop() {
        return Some(cell);
    }
    if let Ok(cell) = shared.global.pop() {
        return Some(cell);
    }
    if !shared.config.enable_work_stealing {
        return None;
    }
    let n = shared.local.len();
    if n <= 1 {
        return None;
    }
    for _ in 0..shared.config.steal_attempts {
        let victim = rng.gen_range(0..n);
        if victim == worker_id {
            continue;
        }
        if let Ok(cell) = shared.local[victim].pop() {
            system.record_scheduler_event(
                Some(worker_id),
                SchedulerEventKind::Stolen { actor_id: cell.id(), from_worker: victim },
            );
            return Some(cell);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_worker_count_falls_back_to_cpu_hint() {
        let cfg = SchedulerConfig {
            worker_threads: 0,
            ..SchedulerConfig::default()
        };
        assert!(cfg.resolved_worker_count() >= 1);
    }

    #[test]
    fn resolved_worker_count_respects_explicit_value() {
        let cfg = SchedulerConfig {
            worker_threads: 4,
            ..SchedulerConfig::default()
        };
        assert_eq!(cfg.resolved_worker_count(), 4);
    }

    #[test]
    fn new_scheduler_has_requested_worker_count() {
        let cfg = SchedulerConfig {
            worker_threads: 3,
            ..SchedulerConfig::default()
        };
        let scheduler = Scheduler::new(cfg);
        assert_eq!(scheduler.worker_count(), 3);
        assert!(!scheduler.is_running());
    }
}
