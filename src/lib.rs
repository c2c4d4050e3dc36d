//! # rit — an in-process, work-stealing actor runtime
//!
//! `rit` runs actors on a fixed pool of OS threads with no async
//! runtime underneath. Messages pass through a preallocated, fixed-size
//! envelope pool rather than per-send heap allocations; a supervisor
//! watches every actor and restarts it with exponential backoff on
//! failure.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use rit::prelude::*;
//!
//! struct Counter {
//!     count: i64,
//! }
//!
//! impl Behavior for Counter {
//!     fn receive(&mut self, env: &Envelope, _ctx: &mut Context<'_>) -> Result<(), BehaviorError> {
//!         if let Payload::Int(n) = env.payload() {
//!             self.count += n;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let system = ActorSystem::new("demo", SystemConfig::default());
//! system.start().unwrap();
//! let counter = system.spawn(Counter { count: 0 }).unwrap();
//! counter.send_user(1i64).unwrap();
//! system.shutdown(std::time::Duration::from_secs(1)).unwrap();
//! ```
//!
//! # Module organization
//!
//! - [`actor`] — behavior trait, lifecycle state machine, and the actor cell
//! - [`message`] — fixed-layout envelopes and the preallocated pool they live in
//! - [`mailbox`] — bounded per-actor inbox
//! - [`queue`] — the SPSC/MPMC ring buffers everything above is built on
//! - [`scheduler`] — worker threads and work stealing
//! - [`supervisor`] — restart policy and failure handling
//! - [`monitoring`] — observability sink shared by every subsystem
//! - [`system`] — [`system::ActorSystem`], the glue that owns all of the above

pub mod actor;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod prelude;
pub mod queue;
pub mod scheduler;
pub mod supervisor;
pub mod system;
pub mod util;

pub use actor::{ActorCell, ActorState, Behavior, BehaviorError, Context, QuantumOutcome};
pub use mailbox::{Mailbox, MailboxError};
pub use message::{Envelope, IntoPayload, Kind, Payload, Pool, PoolError, UserBlob};
pub use monitoring::{
    ActorEvent, ActorEventKind, EventSeverity, InMemoryMonitor, MailboxEvent, MailboxEventKind,
    Monitor, MonitoringConfig, MonitoringError, MonitoringEvent, MonitoringSnapshot, NoopMonitor,
    SchedulerEvent, SchedulerEventKind, SupervisorEvent, SupervisorEventKind,
};
pub use scheduler::{Scheduler, SchedulerConfig, SchedulerStats};
pub use supervisor::{ChildRecord, RestartBackoff, Supervisor, SupervisorConfig, SupervisorStrategy};
pub use system::{ActorRef, ActorStateCounts, ActorSystem, SystemConfig, SystemError, SystemSnapshot};
pub use util::{ActorId, ActorIdGenerator, Sequence, SequenceGenerator};
