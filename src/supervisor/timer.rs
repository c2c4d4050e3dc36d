//! The delayed-restart timer thread (§4.6).
//!
//! A backoff delay must not block a scheduler worker, which owns an
//! actor for at most one quantum at a time. Instead the supervisor hands
//! off `(actor, delay)` pairs to one dedicated timer thread over an
//! [`crate::queue::SpscQueue`] — there is exactly one producer (the
//! supervisor, serialized behind its own mutex) and exactly one consumer
//! (this thread), so the SPSC ring applies cleanly. The thread sleeps out
//! each delay in turn and then submits a `Restart` system message.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tracing::warn;

// Layer 3: Internal module imports
use crate::message::Kind;
use crate::queue::SpscQueue;
use crate::system::{ActorSystem, SystemError};
use crate::util::ActorId;

struct DelayedRestart {
    actor: ActorId,
    delay: Duration,
}

/// Owns the timer thread and the channel used to hand it work. Built in
/// two steps like [`crate::scheduler::Scheduler`]: [`Self::new`]
/// allocates the queue, [`Self::start`] spawns the thread once an
/// [`ActorSystem`] exists to hand it.
pub struct RestartTimer {
    queue: Arc<SpscQueue<DelayedRestart>>,
    running: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RestartTimer {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(SpscQueue::new(256)),
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    /// Spawn the timer thread. `system` is used only to submit the
    /// eventual `Restart` system message. Idempotent: a second call
    /// while a thread is already running is a no-op.
    pub fn start(&self, system: ActorSystem) -> Result<(), SystemError> {
        if self.handle.lock().is_some() {
            return Ok(());
        }
        self.running.store(true, Ordering::Release);

        let thread_queue = self.queue.clone();
        let thread_running = self.running.clone();
        let handle = thread::Builder::new()
            .name("rit-restart-timer".into())
            .spawn(move || run(thread_queue, thread_running, system))
            .map_err(|e| SystemError::Internal(format!("failed to spawn restart timer thread: {e}")))?;

        *self.handle.lock() = Some(handle);
        Ok(())
    }

    /// Request that `actor` receive a `Restart` system message after
    /// `delay`. Silently dropped if the timer's queue is momentarily
    /// full; the caller's own restart-limit accounting bounds how often
    /// this can happen.
    pub fn schedule(&self, actor: ActorId, delay: Duration) {
        if self.queue.push(DelayedRestart { actor, delay }).is_err() {
            warn!(actor = %actor, "restart timer queue full, delayed restart dropped");
        }
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
    }
}

impl Default for RestartTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RestartTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(queue: Arc<SpscQueue<DelayedRestart>>, running: Arc<AtomicBool>, system: ActorSystem) {
    while running.load(Ordering::Acquire) {
        match queue.pop() {
            Ok(req) => {
                thread::sleep(req.delay);
                if let Err(err) = system.send_system(req.actor, ActorId::NONE, Kind::SystemRestart) {
                    warn!(actor = %req.actor, error = %err, "failed to submit delayed restart");
                }
            }
            Err(_) => thread::park_timeout(Duration::from_millis(5)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_does_not_panic_when_queue_has_room() {
        let queue: SpscQueue<DelayedRestart> = SpscQueue::new(4);
        queue
            .push(DelayedRestart {
                actor: ActorId::from_raw(1),
                delay: Duration::from_millis(1),
            })
            .unwrap();
        assert!(!queue.is_empty());
    }
}
