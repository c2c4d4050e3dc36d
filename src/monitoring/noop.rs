//! No-operation monitor implementation with zero overhead (§9).

// Layer 1: Standard library imports
use std::marker::PhantomData;

// Layer 2: Third-party crate imports
use chrono::Utc;

// Layer 3: Internal module imports
use super::error::MonitoringError;
use super::traits::{Monitor, MonitoringEvent};
use super::types::MonitoringSnapshot;

/// Discards every event. The default sink for each of `ActorSystem`'s
/// four `Arc<dyn Monitor<E>>` fields until a caller supplies a real one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor<E: MonitoringEvent> {
    _phantom: PhantomData<E>,
}

impl<E: MonitoringEvent> NoopMonitor<E> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<E: MonitoringEvent> Monitor<E> for NoopMonitor<E> {
    #[inline(always)]
    fn record(&self, _event: E) -> Result<(), MonitoringError> {
        Ok(())
    }

    #[inline(always)]
    fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: 0,
            trace_count: 0,
            debug_count: 0,
            info_count: 0,
            warning_count: 0,
            error_count: 0,
            critical_count: 0,
            recent_events: Vec::new(),
        })
    }

    #[inline(always)]
    fn reset(&self) -> Result<(), MonitoringError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::monitoring::types::{ActorEvent, ActorEventKind};
    use crate::util::ActorId;

    fn test_event() -> ActorEvent {
        ActorEvent {
            timestamp: Utc::now(),
            actor_id: ActorId::from_raw(1),
            kind: ActorEventKind::Started,
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn snapshot_is_always_empty() {
        let monitor = NoopMonitor::<ActorEvent>::new();
        let snapshot = monitor.snapshot().unwrap();
        assert_eq!(snapshot.total_events, 0);
        assert_eq!(snapshot.recent_events.len(), 0);
    }

    #[test]
    fn record_ignores_events() {
        let monitor = NoopMonitor::new();
        for _ in 0..100 {
            monitor.record(test_event()).unwrap();
        }
        assert_eq!(monitor.snapshot().unwrap().total_events, 0);
    }

    #[test]
    fn reset_always_succeeds() {
        let monitor = NoopMonitor::<ActorEvent>::new();
        monitor.reset().unwrap();
    }

    #[test]
    fn concurrent_use_from_many_threads() {
        use std::sync::Arc;
        use std::thread;

        let monitor = Arc::new(NoopMonitor::<ActorEvent>::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let monitor = monitor.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        monitor.record(test_event()).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }
}
