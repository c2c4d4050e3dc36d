//! Fixed-layout message envelopes and the preallocated pool they live in.
//!
//! Every message that crosses an actor boundary — user payload or
//! internal lifecycle signal — is represented the same way: a tagged,
//! 64-byte-aligned [`Envelope`] acquired from a [`Pool`]. Acquiring,
//! publishing, dispatching and releasing an envelope are the only
//! operations the rest of the runtime needs from this module.

pub mod envelope;
pub mod pool;

pub use envelope::{Envelope, IntoPayload, Kind, Payload, UserBlob, INLINE_STRING_CAPACITY};
pub use pool::{Pool, PoolError, DEFAULT_POOL_CAPACITY};
