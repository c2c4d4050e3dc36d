//! Message Pool Benchmarks
//!
//! Measures baseline performance of the envelope pool and mailbox:
//! - Acquire/release round trip
//! - Sustained acquire throughput until exhaustion and back
//! - Mailbox send/recv_batch operations

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::time::Duration;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use rit::mailbox::Mailbox;
use rit::message::{Kind, Payload, Pool};
use rit::util::ActorId;

/// Benchmark: acquire then immediately release a single envelope.
fn pool_acquire_release(c: &mut Criterion) {
    let pool = Pool::new(4096);

    c.bench_function("pool_acquire_release", |b| {
        b.iter(|| {
            let slot = pool
                .acquire(Kind::UserInt, ActorId::from_raw(1), ActorId::NONE, Payload::Int(7))
                .expect("pool not exhausted");
            black_box(pool.envelope(slot).kind());
            pool.release(slot);
        });
    });
}

/// Benchmark: acquire 100 envelopes, then release all 100.
fn pool_batch_acquire_release(c: &mut Criterion) {
    let pool = Pool::new(4096);

    c.bench_function("pool_batch_acquire_release", |b| {
        b.iter(|| {
            let mut slots = Vec::with_capacity(100);
            for i in 0..100 {
                let slot = pool
                    .acquire(Kind::UserInt, ActorId::from_raw(1), ActorId::NONE, Payload::Int(i))
                    .expect("pool not exhausted");
                slots.push(slot);
            }
            for slot in &slots {
                pool.release(*slot);
            }
            black_box(&slots);
        });
    });
}

/// Benchmark: mailbox send/recv_batch under steady load.
fn mailbox_send_recv(c: &mut Criterion) {
    c.bench_function("mailbox_send_recv", |b| {
        b.iter(|| {
            let mailbox = Mailbox::new(1024);
            for i in 0..100 {
                mailbox.send(i).expect("mailbox not full");
            }
            let mut buf = [0usize; 100];
            let n = mailbox.recv_batch(&mut buf);
            black_box(n);
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
        pool_acquire_release,
        pool_batch_acquire_release,
        mailbox_send_recv
}

criterion_main!(benches);
