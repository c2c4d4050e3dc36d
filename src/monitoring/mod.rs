//! Observability sink shared by every subsystem (§3.1, §9).
//!
//! `Monitor<E>` is generic over a closed event enum per subsystem:
//! [`types::ActorEvent`], [`types::MailboxEvent`], [`types::SchedulerEvent`],
//! [`types::SupervisorEvent`]. [`noop::NoopMonitor`] is the zero-overhead
//! default; [`in_memory::InMemoryMonitor`] keeps atomic counters plus a
//! bounded event ring for tests and diagnostics.

pub mod error;
pub mod in_memory;
pub mod noop;
pub mod traits;
pub mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{
    ActorEvent, ActorEventKind, MailboxEvent, MailboxEventKind, MonitoringConfig,
    MonitoringSnapshot, SchedulerEvent, SchedulerEventKind, SupervisorEvent, SupervisorEventKind,
};
