//! Shared scaffolding for the cross-module scenario tests: building a
//! single-node runtime, or a small cluster of nodes sharing one bus and
//! persistence store.

use std::sync::Arc;

use vactor::bus::InMemoryMessageBus;
use vactor::persistence::InMemoryPersistenceStore;
use vactor::placement::PlacementRegistry;
use vactor::system::{Node, RuntimeConfig, RuntimeHandle};
use vactor::util::NodeId;

/// A single node with its own bus, persistence store, and placement cache —
/// fine for scenarios that never need a second host.
pub fn solo_node(node_id: &str) -> Node {
    let bus = Arc::new(InMemoryMessageBus::new());
    shared_node(bus, Arc::new(InMemoryPersistenceStore::new()), node_id)
}

/// A node sharing `bus` and `store` with whatever other nodes the caller
/// builds alongside it, for scenarios spanning more than one host.
pub fn shared_node(
    bus: Arc<InMemoryMessageBus>,
    store: Arc<InMemoryPersistenceStore>,
    node_id: &str,
) -> Node {
    let runtime = Arc::new(RuntimeHandle::new(
        NodeId::new(node_id),
        bus.clone(),
        Arc::new(PlacementRegistry::new(bus)),
        store,
        RuntimeConfig::default(),
    ));
    Node::new(runtime)
}
