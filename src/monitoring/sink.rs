//! An object-safe seam over `Monitor<InstanceEvent>`.
//!
//! `Monitor<E>` requires `Clone`, which is not object-safe, so services
//! that hold "whichever monitor the deployment configured" without
//! naming its concrete type (`RuntimeHandle`, `ActionProxy`) can't hold a
//! `dyn Monitor<InstanceEvent>` directly. `InstanceMonitor` is the
//! dyn-compatible trait they hold instead; [`instance_monitor`] adapts
//! any concrete `Monitor<InstanceEvent>` into one.

use std::sync::Arc;

use async_trait::async_trait;

use super::instance::InstanceEvent;
use super::noop::NoopMonitor;
use super::traits::Monitor;

/// Records `InstanceEvent`s without the caller knowing which concrete
/// `Monitor<InstanceEvent>` implementation backs it.
#[async_trait]
pub trait InstanceMonitor: Send + Sync {
    /// Records `event`. Recording failures are swallowed — observing an
    /// operation must never fail the operation itself.
    async fn record(&self, event: InstanceEvent);
}

struct MonitorSink<M>(M);

#[async_trait]
impl<M: Monitor<InstanceEvent>> InstanceMonitor for MonitorSink<M> {
    async fn record(&self, event: InstanceEvent) {
        let _ = self.0.record(event).await;
    }
}

/// Wraps `monitor` behind the [`InstanceMonitor`] seam.
pub fn instance_monitor<M>(monitor: M) -> Arc<dyn InstanceMonitor>
where
    M: Monitor<InstanceEvent> + 'static,
{
    Arc::new(MonitorSink(monitor))
}

/// The default sink: discards every event with zero overhead.
pub fn noop_instance_monitor() -> Arc<dyn InstanceMonitor> {
    instance_monitor(NoopMonitor::<InstanceEvent>::new())
}
