//! System-level error types (§7).

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::util::ActorId;

/// Errors surfaced by [`crate::system::ActorSystem`] and [`crate::system::ActorRef`]
/// operations.
#[derive(Error, Debug)]
pub enum SystemError {
    /// No actor with this id is registered (or it already stopped).
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The target actor's mailbox is at capacity.
    #[error("actor mailbox full: {0}")]
    MailboxFull(ActorId),

    /// The shared message pool has no free envelope.
    #[error("message pool exhausted")]
    PoolExhausted,

    /// The system is stopping; new spawns and sends are rejected.
    #[error("system is shutting down")]
    ShuttingDown,

    /// `spawn` would exceed the configured actor cap.
    #[error("actor limit exceeded: current {current}, max {max}")]
    ActorLimitExceeded { current: usize, max: usize },

    /// A protocol-level state transition was attempted that the
    /// lifecycle graph does not allow (§4.4).
    #[error("invalid actor state transition: {0}")]
    InvalidTransition(String),

    /// Configuration failed validation.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// `shutdown(timeout)` did not finish draining within the deadline.
    #[error("shutdown timeout exceeded after {0:?}")]
    ShutdownTimeout(Duration),

    /// An invariant the type system can't express was violated — e.g. a
    /// component accessed before construction finished. Always a bug if
    /// observed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SystemError {
    /// Conditions a caller may reasonably retry (mailbox/pool pressure).
    pub fn is_transient(&self) -> bool {
        matches!(self, SystemError::MailboxFull(_) | SystemError::PoolExhausted)
    }

    /// Conditions that mean the system itself can no longer make progress.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SystemError::ShuttingDown | SystemError::ShutdownTimeout(_) | SystemError::Internal(_)
        )
    }

    /// The complement of [`SystemError::is_fatal`].
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_not_found_display() {
        let err = SystemError::ActorNotFound(ActorId::from_raw(7));
        assert!(err.to_string().contains("actor-7"));
    }

    #[test]
    fn mailbox_full_is_transient_not_fatal() {
        let err = SystemError::MailboxFull(ActorId::from_raw(1));
        assert!(err.is_transient());
        assert!(!err.is_fatal());
        assert!(err.is_recoverable());
    }

    #[test]
    fn pool_exhausted_is_transient() {
        assert!(SystemError::PoolExhausted.is_transient());
    }

    #[test]
    fn shutting_down_is_fatal_not_transient() {
        let err = SystemError::ShuttingDown;
        assert!(err.is_fatal());
        assert!(!err.is_transient());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn shutdown_timeout_is_fatal() {
        let err = SystemError::ShutdownTimeout(Duration::from_secs(30));
        assert!(err.is_fatal());
        assert!(err.to_string().contains("30s"));
    }

    #[test]
    fn actor_limit_exceeded_display() {
        let err = SystemError::ActorLimitExceeded { current: 10, max: 5 };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("exceeded"));
    }

    #[test]
    fn not_found_and_config_errors_are_recoverable_non_transient() {
        let not_found = SystemError::ActorNotFound(ActorId::from_raw(1));
        assert!(not_found.is_recoverable());
        assert!(!not_found.is_transient());

        let config_err = SystemError::ConfigError("bad value".to_string());
        assert!(config_err.is_recoverable());
    }
}
