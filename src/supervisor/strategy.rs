//! What a supervisor does when a child fails (§4.6).

/// Action a supervisor takes on child failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SupervisorStrategy {
    /// Restart only the failed child.
    Restart,
    /// Stop the failed child and unregister it; no restart.
    Stop,
    /// Restart every child of the same supervisor.
    RestartAll,
    /// Stop every child of the same supervisor; no restart.
    StopAll,
    /// Hand the failure to the parent supervisor; `Stop` if there is none.
    Escalate,
}

impl Default for SupervisorStrategy {
    fn default() -> Self {
        Self::Restart
    }
}
