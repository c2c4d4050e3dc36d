//! Actor system framework with lifecycle management (§2, §4.7).
//!
//! [`ActorSystem`] is the glue layer: it owns the message pool, the
//! actor registry, the scheduler, and the supervisor, and is the only
//! type user code needs to hold onto. [`ActorRef`] is the stable handle
//! returned by `spawn`.

pub mod actor_system;
pub mod config;
pub mod errors;

pub use actor_system::{ActorRef, ActorStateCounts, ActorSystem, SystemSnapshot};
pub use config::{
    SystemConfig, DEFAULT_ENABLE_WORK_STEALING, DEFAULT_MAILBOX_CAPACITY,
    DEFAULT_MAX_ACTORS, DEFAULT_MAX_MESSAGES_PER_QUANTUM, DEFAULT_MESSAGE_POOL_CAPACITY,
    DEFAULT_QUANTUM_US, DEFAULT_SHUTDOWN_TIMEOUT_MS, DEFAULT_WORKER_THREADS,
};
pub use errors::SystemError;
