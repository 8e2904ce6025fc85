//! `RuntimeHandle`: the shared, cheaply-cloned bundle of node-wide services
//! every instance, proxy, and dispatcher pipeline stage reaches through.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::bus::MessageBus;
use crate::monitoring::{noop_instance_monitor, InstanceMonitor};
use crate::persistence::PersistenceStore;
use crate::placement::PlacementRegistry;
use crate::system::config::RuntimeConfig;
use crate::util::NodeId;

/// Node-wide services shared by every live instance.
///
/// Cloning a `RuntimeHandle` clones only `Arc` pointers, matching the
/// cheap-clone convention used throughout this codebase for service-like
/// structs.
#[derive(Clone)]
pub struct RuntimeHandle {
    node_id: NodeId,
    bus: Arc<dyn MessageBus>,
    placement: Arc<PlacementRegistry>,
    persistence_store: Arc<dyn PersistenceStore>,
    config: RuntimeConfig,
    monitor: Arc<dyn InstanceMonitor>,
}

impl RuntimeHandle {
    /// Assembles a handle from its constituent services. Events are
    /// discarded by a [`crate::monitoring::NoopMonitor`] until
    /// [`RuntimeHandle::with_monitor`] configures a real sink.
    pub fn new(
        node_id: NodeId,
        bus: Arc<dyn MessageBus>,
        placement: Arc<PlacementRegistry>,
        persistence_store: Arc<dyn PersistenceStore>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            node_id,
            bus,
            placement,
            persistence_store,
            config,
            monitor: noop_instance_monitor(),
        }
    }

    /// Replaces the instance-event sink, e.g. with an
    /// [`crate::monitoring::InMemoryMonitor`] wrapped by
    /// [`crate::monitoring::instance_monitor`].
    pub fn with_monitor(mut self, monitor: Arc<dyn InstanceMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    /// This process's node identifier.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// The cluster transport.
    pub fn bus(&self) -> &Arc<dyn MessageBus> {
        &self.bus
    }

    /// The singular-placement registry.
    pub fn placement(&self) -> &Arc<PlacementRegistry> {
        &self.placement
    }

    /// The durable persistence collaborator.
    pub fn persistence_store(&self) -> &Arc<dyn PersistenceStore> {
        &self.persistence_store
    }

    /// The active runtime configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The instance-event sink every lifecycle and placement transition
    /// is reported to.
    pub fn monitor(&self) -> &Arc<dyn InstanceMonitor> {
        &self.monitor
    }
}
