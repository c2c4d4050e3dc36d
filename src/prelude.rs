//! Convenient glob import for building actors with `rit`.
//!
//! ```rust
//! use rit::prelude::*;
//! ```

pub use crate::actor::{Behavior, BehaviorError, Context};
pub use crate::message::{Envelope, IntoPayload, Kind, Payload};
pub use crate::monitoring::{InMemoryMonitor, Monitor, NoopMonitor};
pub use crate::supervisor::{SupervisorConfig, SupervisorStrategy};
pub use crate::system::{ActorRef, ActorSystem, SystemConfig, SystemError};
pub use crate::util::ActorId;
