//! Monitoring configuration and snapshot structures shared by every
//! event type the monitor records.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};

/// Configuration for monitoring behavior.
///
/// Controls how events are recorded, filtered, and stored in the monitor.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled
    pub enabled: bool,

    /// Maximum number of events to keep in history
    pub max_history_size: usize,

    /// Minimum severity level to record (events below this are filtered)
    pub severity_filter: EventSeverity,

    /// Interval for snapshot generation (if using background snapshots)
    #[serde(with = "crate::util::duration_serde")]
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
///
/// Provides queryable access to monitoring counters and recent event history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// Timestamp when snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Total number of events recorded
    pub total_events: u64,

    /// Number of trace-level events
    pub trace_count: u64,

    /// Number of debug-level events
    pub debug_count: u64,

    /// Number of info-level events
    pub info_count: u64,

    /// Number of warning-level events
    pub warning_count: u64,

    /// Number of error-level events
    pub error_count: u64,

    /// Number of critical-level events
    pub critical_count: u64,

    /// Recent events (up to max_history_size)
    pub recent_events: Vec<E>,
}
