//! # Monitoring Module
//!
//! Typed event observation for the virtual-actor runtime: a generic
//! `Monitor<E>` trait, a zero-cost `NoopMonitor`, and an `InMemoryMonitor`
//! reference implementation with atomic counters and a bounded ring
//! buffer of event history.
//!
//! ## Event Types
//! - [`InstanceEvent`]: activation, deactivation, eviction, lock
//!   acquisition, placement nomination, migration
//!
//! ## Examples
//! ```rust,ignore
//! use vactor::monitoring::{InMemoryMonitor, MonitoringConfig, InstanceEvent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MonitoringConfig::default();
//! let monitor = InMemoryMonitor::new(config);
//!
//! // monitor.record(event).await?;
//! // let snapshot = monitor.snapshot().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod in_memory;
pub mod instance;
pub mod noop;
pub mod sink;
pub mod traits;
pub mod types;

pub use error::MonitoringError;
pub use in_memory::InMemoryMonitor;
pub use instance::{InstanceEvent, InstanceEventKind};
pub use noop::NoopMonitor;
pub use sink::{instance_monitor, noop_instance_monitor, InstanceMonitor};
pub use traits::{EventSeverity, Monitor, MonitoringEvent};
pub use types::{MonitoringConfig, MonitoringSnapshot};
