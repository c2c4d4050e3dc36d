//! Supervisor configuration and per-child bookkeeping (§3, §4.6).

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::supervisor::backoff::RestartBackoff;
use crate::supervisor::strategy::SupervisorStrategy;
use crate::util::ActorId;

/// Policy a supervisor applies to every child it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorConfig {
    pub strategy: SupervisorStrategy,
    pub max_restarts: u32,
    pub restart_window: Duration,
    pub backoff_initial: Duration,
    pub backoff_max: Duration,
    pub backoff_multiplier: f64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            strategy: SupervisorStrategy::Restart,
            max_restarts: 3,
            restart_window: Duration::from_secs(60),
            backoff_initial: Duration::from_millis(100),
            backoff_max: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

/// One supervised child: its id, the parent that owns it (for
/// escalation), and its restart bookkeeping.
pub struct ChildRecord {
    pub actor_id: ActorId,
    pub parent: Option<ActorId>,
    pub backoff: RestartBackoff,
}

impl ChildRecord {
    pub fn new(actor_id: ActorId, parent: Option<ActorId>, config: &SupervisorConfig) -> Self {
        Self {
            actor_id,
            parent,
            backoff: RestartBackoff::new(
                config.max_restarts,
                config.restart_window,
                config.backoff_initial,
                config.backoff_max,
                config.backoff_multiplier,
            ),
        }
    }
}
