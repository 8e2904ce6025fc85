//! In-memory monitor implementation with lock-free atomic counters.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::error::MonitoringError;
use super::traits::{EventSeverity, Monitor, MonitoringEvent};
use super::types::{MonitoringConfig, MonitoringSnapshot};

/// In-memory monitor implementation with lock-free atomic counters.
///
/// This implementation provides efficient concurrent event recording using atomic
/// operations for counters and a bounded ring buffer for event history.
///
/// # Architecture
///
/// Uses the M-SERVICES-CLONE pattern with Arc<Inner> for cheap cloning:
/// - Atomic counters for lock-free event counting
/// - RwLock for ring buffer (read-heavy optimization)
/// - Bounded memory with configurable history size
///
/// # Examples
///
/// ```
/// use vactor::monitoring::{InMemoryMonitor, Monitor, MonitoringConfig, InstanceEvent, InstanceEventKind};
/// use vactor::util::{ActorIdentity, ActorRef};
/// use chrono::Utc;
/// use std::collections::HashMap;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MonitoringConfig::default();
/// let monitor = InMemoryMonitor::new(config);
///
/// // Record an event
/// let event = InstanceEvent {
///     timestamp: Utc::now(),
///     actor_ref: ActorRef::new("Counter", ActorIdentity::single("a")),
///     event_kind: InstanceEventKind::Activated,
///     metadata: HashMap::new(),
/// };
/// monitor.record(event).await?;
///
/// // Get snapshot
/// let snapshot = monitor.snapshot().await?;
/// assert_eq!(snapshot.total_events, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InMemoryMonitor<E: MonitoringEvent> {
    inner: Arc<InMemoryMonitorInner<E>>,
}

/// Inner state for InMemoryMonitor following M-SERVICES-CLONE pattern.
#[derive(Debug)]
struct InMemoryMonitorInner<E: MonitoringEvent> {
    config: MonitoringConfig,

    // Lock-free atomic counters for concurrent access
    total_events: AtomicU64,
    trace_count: AtomicU64,
    debug_count: AtomicU64,
    info_count: AtomicU64,
    warning_count: AtomicU64,
    error_count: AtomicU64,
    critical_count: AtomicU64,

    // Ring buffer for event history (read-heavy optimization with RwLock)
    history: RwLock<VecDeque<E>>,
}

impl<E: MonitoringEvent> InMemoryMonitor<E> {
    /// Creates a new in-memory monitor with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use vactor::monitoring::{InMemoryMonitor, MonitoringConfig, InstanceEvent};
    ///
    /// let config = MonitoringConfig::default();
    /// let monitor = InMemoryMonitor::<InstanceEvent>::new(config);
    /// ```
    pub fn new(config: MonitoringConfig) -> Self {
        Self {
            inner: Arc::new(InMemoryMonitorInner {
                config,
                total_events: AtomicU64::new(0),
                trace_count: AtomicU64::new(0),
                debug_count: AtomicU64::new(0),
                info_count: AtomicU64::new(0),
                warning_count: AtomicU64::new(0),
                error_count: AtomicU64::new(0),
                critical_count: AtomicU64::new(0),
                history: RwLock::new(VecDeque::new()),
            }),
        }
    }

    /// Increments the appropriate severity counter atomically.
    fn increment_severity_counter(&self, severity: EventSeverity) {
        match severity {
            EventSeverity::Trace => self.inner.trace_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Debug => self.inner.debug_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Info => self.inner.info_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Warning => self.inner.warning_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Error => self.inner.error_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Critical => self.inner.critical_count.fetch_add(1, Ordering::Relaxed),
        };
    }
}

impl<E: MonitoringEvent> Clone for InMemoryMonitor<E> {
    /// Cheap clone using Arc (M-SERVICES-CLONE pattern).
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<E: MonitoringEvent> Monitor<E> for InMemoryMonitor<E> {
    async fn record(&self, event: E) -> Result<(), MonitoringError> {
        // Early return if monitoring is disabled
        if !self.inner.config.enabled {
            return Ok(());
        }

        let severity = event.severity();

        // Early return if below severity threshold
        if severity < self.inner.config.severity_filter {
            return Ok(());
        }

        // Increment total events counter (lock-free)
        self.inner.total_events.fetch_add(1, Ordering::Relaxed);

        // Increment severity-specific counter (lock-free)
        self.increment_severity_counter(severity);

        // Add to ring buffer history
        let mut history =
            self.inner.history.write().map_err(|e| {
                MonitoringError::record(format!("Failed to acquire write lock: {e}"))
            })?;

        // Enforce ring buffer size limit
        if history.len() >= self.inner.config.max_history_size {
            history.pop_front();
        }

        history.push_back(event);

        Ok(())
    }

    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        // Read all atomic counters
        let total_events = self.inner.total_events.load(Ordering::Relaxed);
        let trace_count = self.inner.trace_count.load(Ordering::Relaxed);
        let debug_count = self.inner.debug_count.load(Ordering::Relaxed);
        let info_count = self.inner.info_count.load(Ordering::Relaxed);
        let warning_count = self.inner.warning_count.load(Ordering::Relaxed);
        let error_count = self.inner.error_count.load(Ordering::Relaxed);
        let critical_count = self.inner.critical_count.load(Ordering::Relaxed);

        // Read history with RwLock
        let history =
            self.inner.history.read().map_err(|e| {
                MonitoringError::snapshot(format!("Failed to acquire read lock: {e}"))
            })?;

        let recent_events = history.iter().cloned().collect();

        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events,
            trace_count,
            debug_count,
            info_count,
            warning_count,
            error_count,
            critical_count,
            recent_events,
        })
    }

    async fn reset(&self) -> Result<(), MonitoringError> {
        // Reset all atomic counters to 0
        self.inner.total_events.store(0, Ordering::Relaxed);
        self.inner.trace_count.store(0, Ordering::Relaxed);
        self.inner.debug_count.store(0, Ordering::Relaxed);
        self.inner.info_count.store(0, Ordering::Relaxed);
        self.inner.warning_count.store(0, Ordering::Relaxed);
        self.inner.error_count.store(0, Ordering::Relaxed);
        self.inner.critical_count.store(0, Ordering::Relaxed);

        // Clear ring buffer history
        let mut history =
            self.inner.history.write().map_err(|e| {
                MonitoringError::reset(format!("Failed to acquire write lock: {e}"))
            })?;

        history.clear();

        Ok(())
    }
}
