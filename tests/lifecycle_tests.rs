//! Actor lifecycle integration tests.
//!
//! # Coverage
//!
//! 1. **Echo** — a spawned actor processes every message it is sent, in order.
//! 2. **Mailbox backpressure** — a full mailbox rejects sends, and queued
//!    messages survive a suspend/resume cycle in order.
//! 3. **Ping/Pong** — the actor core answers `Ping` with `Pong` without the
//!    behavior ever seeing it.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use rit::actor::{Behavior, BehaviorError, Context};
use rit::message::{Envelope, Kind, Payload};
use rit::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, NoopMonitor};
use rit::system::{ActorSystem, SystemConfig};

struct Collector {
    seen: Arc<Mutex<Vec<i64>>>,
}

impl Behavior for Collector {
    fn receive(&mut self, env: &Envelope, _ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        if let Payload::Int(n) = env.payload() {
            self.seen.lock().unwrap().push(*n);
        }
        Ok(())
    }
}

fn wait_until(mut predicate: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while !predicate() {
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    true
}

#[test]
fn s1_echo_processes_messages_in_order() {
    let system = ActorSystem::new("s1-echo", SystemConfig::default());
    system.start().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let actor = system.spawn(Collector { seen: seen.clone() }).unwrap();

    actor.send_user(1i64).unwrap();
    actor.send_user(2i64).unwrap();
    actor.send_user(3i64).unwrap();

    assert!(wait_until(|| seen.lock().unwrap().len() == 3, Duration::from_secs(2)));
    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);

    system.shutdown(Duration::from_secs(1)).unwrap();
}

#[test]
fn s2_full_mailbox_rejects_sends_and_resume_drains_in_order() {
    let config = SystemConfig::builder()
        .with_worker_threads(2)
        .with_mailbox_capacity(4)
        .build()
        .unwrap();
    let system = ActorSystem::new("s2-backpressure", config);
    system.start().unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let actor = system.spawn(Collector { seen: seen.clone() }).unwrap();

    actor.send_control(Kind::ControlSuspend).unwrap();
    assert!(wait_until(
        || actor.state() == rit::actor::ActorState::Suspended,
        Duration::from_secs(1)
    ));

    for i in 1..=4 {
        actor.send_user(i as i64).unwrap();
    }
    let overflow = actor.send_user(5i64);
    assert!(matches!(overflow, Err(rit::system::SystemError::MailboxFull(_))));

    // Queued messages must still be sitting in the mailbox, untouched,
    // while the actor is suspended.
    std::thread::sleep(Duration::from_millis(50));
    assert!(seen.lock().unwrap().is_empty());

    actor.send_control(Kind::ControlResume).unwrap();

    assert!(wait_until(|| seen.lock().unwrap().len() == 4, Duration::from_secs(2)));
    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);

    system.shutdown(Duration::from_secs(1)).unwrap();
}

#[test]
fn s5_ping_is_answered_with_pong_without_reaching_the_behavior() {
    struct NoOp {
        user_messages_seen: Arc<AtomicUsize>,
    }
    impl Behavior for NoOp {
        fn receive(&mut self, _env: &Envelope, _ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
            self.user_messages_seen.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    let mailbox_monitor = Arc::new(InMemoryMonitor::new(MonitoringConfig::default()));
    let system = ActorSystem::with_monitors(
        "s5-ping-pong",
        SystemConfig::default(),
        Arc::new(NoopMonitor::new()),
        mailbox_monitor.clone(),
        Arc::new(NoopMonitor::new()),
        Arc::new(NoopMonitor::new()),
    );
    system.start().unwrap();

    let user_messages_seen = Arc::new(AtomicUsize::new(0));
    let a = system
        .spawn(NoOp { user_messages_seen: user_messages_seen.clone() })
        .unwrap();
    let b = system
        .spawn(NoOp { user_messages_seen: user_messages_seen.clone() })
        .unwrap();

    let enqueued_to_a_before = mailbox_monitor
        .snapshot()
        .unwrap()
        .recent_events
        .iter()
        .filter(|e| e.actor_id == a.id())
        .count();

    // B receives a Ping whose reply address is A; B's core answers with
    // a Pong routed back to A, never surfacing either to user code.
    b.ping(a.id()).unwrap();

    let observed = wait_until(
        || {
            mailbox_monitor
                .snapshot()
                .unwrap()
                .recent_events
                .iter()
                .filter(|e| e.actor_id == a.id())
                .count()
                > enqueued_to_a_before
        },
        Duration::from_secs(2),
    );
    assert!(observed, "expected a Pong to be enqueued into A's mailbox");
    assert_eq!(user_messages_seen.load(Ordering::Relaxed), 0);

    system.shutdown(Duration::from_secs(1)).unwrap();
}
