//! Monitoring event types and configuration (§3.1).

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::Serialize;

// Layer 3: Internal module imports
use super::traits::{EventSeverity, MonitoringEvent};
use crate::util::ActorId;

/// Configuration for monitoring behavior.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub max_history_size: usize,
    pub severity_filter: EventSeverity,
    #[serde(with = "crate::util::duration_millis")]
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Snapshot of monitoring state at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    pub timestamp: DateTime<Utc>,
    pub total_events: u64,
    pub trace_count: u64,
    pub debug_count: u64,
    pub info_count: u64,
    pub warning_count: u64,
    pub error_count: u64,
    pub critical_count: u64,
    pub recent_events: Vec<E>,
}

// ============================================================================
// Actor events
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ActorEvent {
    pub timestamp: DateTime<Utc>,
    pub actor_id: ActorId,
    pub kind: ActorEventKind,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for ActorEvent {
    const EVENT_TYPE: &'static str = "actor";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.kind {
            ActorEventKind::Created => EventSeverity::Debug,
            ActorEventKind::Started => EventSeverity::Info,
            ActorEventKind::MessageHandled { .. } => EventSeverity::Trace,
            ActorEventKind::Failed { .. } => EventSeverity::Error,
            ActorEventKind::Restarted { .. } => EventSeverity::Warning,
            ActorEventKind::Stopped => EventSeverity::Info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ActorEventKind {
    Created,
    Started,
    MessageHandled { duration_micros: u64 },
    Failed { reason: String },
    Restarted { restart_count: u32 },
    Stopped,
}

// ============================================================================
// Mailbox events
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MailboxEvent {
    pub timestamp: DateTime<Utc>,
    pub actor_id: ActorId,
    pub kind: MailboxEventKind,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for MailboxEvent {
    const EVENT_TYPE: &'static str = "mailbox";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.kind {
            MailboxEventKind::Enqueued { .. } => EventSeverity::Trace,
            MailboxEventKind::Dropped { .. } => EventSeverity::Error,
            MailboxEventKind::Full => EventSeverity::Warning,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum MailboxEventKind {
    Enqueued { queue_size: usize },
    Dropped { reason: String },
    Full,
}

// ============================================================================
// Scheduler events
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerEvent {
    pub timestamp: DateTime<Utc>,
    pub worker_id: Option<usize>,
    pub kind: SchedulerEventKind,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for SchedulerEvent {
    const EVENT_TYPE: &'static str = "scheduler";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.kind {
            SchedulerEventKind::Scheduled { .. } => EventSeverity::Trace,
            SchedulerEventKind::Stolen { .. } => EventSeverity::Debug,
            SchedulerEventKind::QuantumExhausted { .. } => EventSeverity::Trace,
            SchedulerEventKind::Parked => EventSeverity::Trace,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum SchedulerEventKind {
    Scheduled { actor_id: ActorId },
    Stolen { actor_id: ActorId, from_worker: usize },
    QuantumExhausted { actor_id: ActorId, processed: usize },
    Parked,
}

// ============================================================================
// Supervisor events
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SupervisorEvent {
    pub timestamp: DateTime<Utc>,
    pub actor_id: ActorId,
    pub kind: SupervisorEventKind,
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for SupervisorEvent {
    const EVENT_TYPE: &'static str = "supervisor";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.kind {
            SupervisorEventKind::Restarted { .. } => EventSeverity::Warning,
            SupervisorEventKind::BackoffScheduled { .. } => EventSeverity::Info,
            SupervisorEventKind::Escalated => EventSeverity::Error,
            SupervisorEventKind::Stopped => EventSeverity::Info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum SupervisorEventKind {
    Restarted { restart_count: u32 },
    BackoffScheduled {
        #[serde(with = "crate::util::duration_millis")]
        delay: Duration,
    },
    Escalated,
    Stopped,
}
