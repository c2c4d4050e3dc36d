//! Serde helpers for types that don't serialize the way we want by default.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Deserializer, Serializer};

// Layer 3: Internal module imports
// (none)

/// Serialize/deserialize a [`Duration`] as whole milliseconds, so config
/// files stay plain integers instead of `{secs, nanos}` structs.
pub mod duration_millis {
    use super::*;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}
