//! System configuration with sensible defaults (§6).

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use serde::{Deserialize, Serialize};

// Layer 3: Internal
use crate::supervisor::SupervisorConfig;

/// `0` resolves to a CPU-count hint at scheduler start (§6).
pub const DEFAULT_WORKER_THREADS: usize = 0;

/// Per-actor mailbox size; must be a power of two.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 1024;

/// Preallocated envelope count.
pub const DEFAULT_MESSAGE_POOL_CAPACITY: usize = 65_535;

/// Per-drain message bound.
pub const DEFAULT_MAX_MESSAGES_PER_QUANTUM: usize = 256;

/// Per-drain wall-clock bound, in microseconds.
pub const DEFAULT_QUANTUM_US: u64 = 100;

/// Whether idle workers attempt to steal from peers.
pub const DEFAULT_ENABLE_WORK_STEALING: bool = true;

/// Hard cap on the actor registry (0 = unlimited).
pub const DEFAULT_MAX_ACTORS: usize = 100_000;

/// Drain deadline for graceful shutdown, in milliseconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 30_000;

/// System-wide configuration for the actor runtime (§6).
///
/// # Examples
///
/// ```rust
/// use rit::system::{SystemConfig, DEFAULT_MAILBOX_CAPACITY};
///
/// let config = SystemConfig::default();
/// assert_eq!(config.mailbox_capacity, DEFAULT_MAILBOX_CAPACITY);
///
/// let config = SystemConfig::builder()
///     .with_mailbox_capacity(512)
///     .with_worker_threads(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.mailbox_capacity, 512);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Number of scheduler worker threads. `0` means "use a CPU-count hint".
    pub worker_threads: usize,

    /// Per-actor mailbox size; must be a power of two.
    pub mailbox_capacity: usize,

    /// Envelopes preallocated in the shared message pool.
    pub message_pool_capacity: usize,

    /// Per-drain message bound (§4.4).
    pub max_messages_per_quantum: usize,

    /// Per-drain wall-clock bound (§4.4).
    pub quantum: Duration,

    /// Toggles steal attempts by idle workers.
    pub enable_work_stealing: bool,

    /// Hard cap on the actor registry (0 = unlimited).
    pub max_actors: usize,

    /// Drain deadline for graceful shutdown.
    pub shutdown_timeout: Duration,

    /// Default restart policy applied to every spawned actor.
    pub supervisor: SupervisorConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            worker_threads: DEFAULT_WORKER_THREADS,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            message_pool_capacity: DEFAULT_MESSAGE_POOL_CAPACITY,
            max_messages_per_quantum: DEFAULT_MAX_MESSAGES_PER_QUANTUM,
            quantum: Duration::from_micros(DEFAULT_QUANTUM_US),
            enable_work_stealing: DEFAULT_ENABLE_WORK_STEALING,
            max_actors: DEFAULT_MAX_ACTORS,
            shutdown_timeout: Duration::from_millis(DEFAULT_SHUTDOWN_TIMEOUT_MS),
            supervisor: SupervisorConfig::default(),
        }
    }
}

impl SystemConfig {
    /// Create a new configuration builder.
    pub fn builder() -> SystemConfigBuilder {
        SystemConfigBuilder::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns a description of the first invalid field found.
    pub fn validate(&self) -> Result<(), String> {
        if self.mailbox_capacity == 0 {
            return Err("mailbox_capacity must be > 0".to_string());
        }
        if !self.mailbox_capacity.is_power_of_two() {
            return Err("mailbox_capacity must be a power of two".to_string());
        }
        if self.message_pool_capacity == 0 {
            return Err("message_pool_capacity must be > 0".to_string());
        }
        if self.max_messages_per_quantum == 0 {
            return Err("max_messages_per_quantum must be > 0".to_string());
        }
        if self.quantum.is_zero() {
            return Err("quantum must be > 0".to_string());
        }
        if self.shutdown_timeout.is_zero() {
            return Err("shutdown_timeout must be > 0".to_string());
        }
        if self.supervisor.backoff_multiplier < 1.0 {
            return Err("supervisor.backoff_multiplier must be >= 1.0".to_string());
        }
        Ok(())
    }
}

/// Builder for [`SystemConfig`] with a fluent API.
#[derive(Debug, Default)]
pub struct SystemConfigBuilder {
    config: SystemConfig,
}

impl SystemConfigBuilder {
    /// Set the number of scheduler worker threads (`0` = CPU-count hint).
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.config.worker_threads = threads;
        self
    }

    /// Set the per-actor mailbox capacity; must be a power of two.
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.config.mailbox_capacity = capacity;
        self
    }

    /// Set the number of envelopes preallocated in the message pool.
    pub fn with_message_pool_capacity(mut self, capacity: usize) -> Self {
        self.config.message_pool_capacity = capacity;
        self
    }

    /// Set the per-drain message bound.
    pub fn with_max_messages_per_quantum(mut self, max: usize) -> Self {
        self.config.max_messages_per_quantum = max;
        self
    }

    /// Set the per-drain wall-clock bound.
    pub fn with_quantum(mut self, quantum: Duration) -> Self {
        self.config.quantum = quantum;
        self
    }

    /// Toggle work stealing for idle workers.
    pub fn with_work_stealing(mut self, enabled: bool) -> Self {
        self.config.enable_work_stealing = enabled;
        self
    }

    /// Set the hard cap on the actor registry (`0` = unlimited).
    pub fn with_max_actors(mut self, max: usize) -> Self {
        self.config.max_actors = max;
        self
    }

    /// Set the drain deadline for graceful shutdown.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    /// Replace the default supervisor policy applied to spawned actors.
    pub fn with_supervisor(mut self, supervisor: SupervisorConfig) -> Self {
        self.config.supervisor = supervisor;
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    /// Returns a description of the first invalid field found.
    pub fn build(self) -> Result<SystemConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}
