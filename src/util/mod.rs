//! Utility types and helpers for the actor system

pub mod ids;
pub mod serde_helpers;

pub use ids::{ActorId, ActorIdGenerator, Sequence, SequenceGenerator};
pub use serde_helpers::duration_millis;
