//! Supervision Benchmarks
//!
//! Measures baseline performance of supervision operations:
//! - Child registration
//! - Failure handling and restart scheduling
//! - Restart-limit-exceeded downgrade path

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
use rit::supervisor::{Supervisor, SupervisorConfig, SupervisorStrategy};
use rit::system::{ActorSystem, SystemConfig};
use rit::util::ActorId;

struct NoOp;

impl Behavior for NoOp {
    fn receive(&mut self, _env: &Envelope, _ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
        Ok(())
    }
}

fn bench_system() -> ActorSystem {
    let config = SystemConfig::builder()
        .with_worker_threads(2)
        .build()
        .expect("valid bench config");
    let system = ActorSystem::new("bench-supervisor", config);
    system.start().unwrap();
    system
}

/// Benchmark: register a child with the supervisor.
fn supervisor_register(c: &mut Criterion) {
    let system = bench_system();
    let supervisor = Supervisor::new(SupervisorConfig::default(), system.clone());
    let mut next_id = 1u32;

    c.bench_function("supervisor_register", |b| {
        b.iter(|| {
            let id = ActorId::from_raw(next_id);
            next_id += 1;
            supervisor.register(id, None);
            black_box(id);
        });
    });
}

/// Benchmark: handle a failure under the default `Restart` strategy.
fn supervisor_on_failure_restart(c: &mut Criterion) {
    let system = bench_system();
    let config = SupervisorConfig {
        max_restarts: u32::MAX,
        ..SupervisorConfig::default()
    };
    let supervisor = Supervisor::new(config, system.clone());
    let actor = system.spawn(NoOp).expect("spawn succeeds");
    supervisor.register(actor.id(), None);

    c.bench_function("supervisor_on_failure_restart", |b| {
        b.iter(|| {
            let err = BehaviorError::new(std::io::Error::other("bench failure"));
            supervisor.on_failure(&system, actor.id(), &err);
        });
    });
}

/// Benchmark: failure handling once the restart limit has been
/// exceeded, exercising the downgrade-to-stop path.
fn supervisor_restart_limit_exceeded(c: &mut Criterion) {
    let system = bench_system();
    let config = SupervisorConfig {
        strategy: SupervisorStrategy::Restart,
        max_restarts: 0,
        ..SupervisorConfig::default()
    };
    let supervisor = Supervisor::new(config, system.clone());
    let mut next_id = 1u32;

    c.bench_function("supervisor_restart_limit_exceeded", |b| {
        b.iter(|| {
            let id = ActorId::from_raw(next_id);
            next_id += 1;
            supervisor.register(id, None);
            let err = BehaviorError::new(std::io::Error::other("bench failure"));
            supervisor.on_failure(&system, id, &err);
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
        supervisor_register,
        supervisor_on_failure_restart,
        supervisor_restart_limit_exceeded
}

criterion_main!(benches);
