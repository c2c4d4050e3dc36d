//! Scheduler Benchmarks
//!
//! Measures baseline performance of actor spawn and message dispatch
//! through the full system (pool + mailbox + scheduler):
//! - Single actor spawn
//! - Batch spawn of 10 actors
//! - Sustained single-actor message throughput
//! - Broadcast to 10 actors

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::time::Duration;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use rit::actor::{Behavior, BehaviorError, Context};
use rit::message::Envelope;
use rit::system::{ActorSystem, SystemConfig};

struct NoOp;

impl Behavior for NoOp {
    fn receive(&mut self, _env: &Envelope, _ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        Ok(())
    }
}

fn bench_config() -> SystemConfig {
    SystemConfig::builder()
        .with_worker_threads(4)
        .with_mailbox_capacity(1024)
        .with_message_pool_capacity(65_536)
        .build()
        .expect("valid bench config")
}

/// Benchmark: spawn a single actor.
fn scheduler_actor_spawn(c: &mut Criterion) {
    let system = ActorSystem::new("bench-spawn", bench_config());
    system.start().unwrap();

    c.bench_function("scheduler_actor_spawn", |b| {
        b.iter(|| {
            let actor_ref = system.spawn(NoOp).expect("spawn succeeds");
            black_box(actor_ref);
        });
    });
}

/// Benchmark: spawn a batch of 10 actors.
fn scheduler_batch_spawn(c: &mut Criterion) {
    let system = ActorSystem::new("bench-batch-spawn", bench_config());
    system.start().unwrap();

    c.bench_function("scheduler_batch_spawn", |b| {
        b.iter(|| {
            let refs: Vec<_> = (0..10)
                .map(|_| system.spawn(NoOp).expect("spawn succeeds"))
                .collect();
            black_box(refs);
        });
    });
}

/// Benchmark: sustained message throughput to one actor.
fn scheduler_message_throughput(c: &mut Criterion) {
    let system = ActorSystem::new("bench-throughput", bench_config());
    system.start().unwrap();
    let actor = system.spawn(NoOp).expect("spawn succeeds");

    c.bench_function("scheduler_message_throughput", |b| {
        b.iter(|| {
            for i in 0..100 {
                let _ = actor.send_user(i as i64);
            }
        });
    });
}

/// Benchmark: broadcast a message to 10 actors.
fn scheduler_broadcast_small(c: &mut Criterion) {
    let system = ActorSystem::new("bench-broadcast", bench_config());
    system.start().unwrap();
    for _ in 0..10 {
        system.spawn(NoOp).expect("spawn succeeds");
    }

    c.bench_function("scheduler_broadcast_small", |b| {
        b.iter(|| {
            system.broadcast(1i64);
        });
    });
}

/// Configure criterion for resource-conscious benchmarking.
fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2))
        .without_plots()
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets =
        scheduler_actor_spawn,
        scheduler_batch_spawn,
        scheduler_message_throughput,
        scheduler_broadcast_small
}

criterion_main!(benches);
