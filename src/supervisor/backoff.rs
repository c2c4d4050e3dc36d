//! Restart rate limiting and exponential backoff (§4.6).
//!
//! Unlike a sliding-window recount, this tracks one running count and one
//! running delay per child: each restart either continues the existing
//! sequence (`next = min(prev * multiplier, max)`) or, if the window has
//! elapsed since the last restart, starts over at `initial` with the
//! count reset to 1 (Testable Property #7).

// Layer 1: Standard library imports
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// Per-child restart bookkeeping: count, last restart time, and the
/// backoff delay to apply on the next one.
#[derive(Debug, Clone)]
pub struct RestartBackoff {
    max_restarts: u32,
    restart_window: Duration,
    initial: Duration,
    max: Duration,
    multiplier: f64,
    restart_count: u32,
    last_restart_at: Option<Instant>,
    prev_backoff: Option<Duration>,
}

impl RestartBackoff {
    /// `multiplier` should be >= 1.0; a value below 1 would make the
    /// delay shrink, which is not what exponential backoff means.
    pub fn new(
        max_restarts: u32,
        restart_window: Duration,
        initial: Duration,
        max: Duration,
        multiplier: f64,
    ) -> Self {
        Self {
            max_restarts,
            restart_window,
            initial,
            max,
            multiplier,
            restart_count: 0,
            last_restart_at: None,
            prev_backoff: None,
        }
    }

    /// Would recording a restart at `now` put this child over budget?
    /// Mirrors the window logic in [`Self::record_restart`] without
    /// mutating any state, so the caller can check the limit *before*
    /// committing to the restart (spec.md:156's "if restart_count >=
    /// max_restarts, downgrade to Stop; otherwise record a restart").
    pub fn would_exceed_limit(&self, now: Instant) -> bool {
        let within_window = self
            .last_restart_at
            .is_some_and(|last| now.duration_since(last) <= self.restart_window);
        let effective_count = if within_window { self.restart_count } else { 0 };
        effective_count >= self.max_restarts
    }

    /// Record a restart at `now` and return the backoff delay to apply
    /// before actually restarting the child.
    pub fn record_restart(&mut self, now: Instant) -> Duration {
        let within_window = self
            .last_restart_at
            .is_some_and(|last| now.duration_since(last) <= self.restart_window);

        let next = if within_window {
            self.restart_count += 1;
            match self.prev_backoff {
                Some(prev) => scale(prev, self.multiplier).min(self.max),
                None => self.initial,
            }
        } else {
            self.restart_count = 1;
            self.initial
        };

        self.last_restart_at = Some(now);
        self.prev_backoff = Some(next);
        next
    }

    /// Restarts recorded within the current window.
    pub fn restart_count(&self) -> u32 {
        self.restart_count
    }

    /// `true` once `restart_count` has reached `max_restarts` for the
    /// current window; the supervisor should downgrade to `Stop`.
    pub fn is_limit_exceeded(&self) -> bool {
        self.restart_count >= self.max_restarts
    }

    /// Clear all history, e.g. after a clean stop/restart cycle outside
    /// failure handling.
    pub fn reset(&mut self) {
        self.restart_count = 0;
        self.last_restart_at = None;
        self.prev_backoff = None;
    }
}

fn scale(d: Duration, multiplier: f64) -> Duration {
    Duration::from_secs_f64((d.as_secs_f64() * multiplier).max(0.0))
}
