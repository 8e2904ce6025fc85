//! The external collaborator interface for the transport/message bus.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::bus::error::BusError;
use crate::invocation::{Invocation, InvocationReply};
use crate::util::{ActorRef, NodeId};

/// Receives invocations forwarded to a node by the bus.
///
/// Implemented by the [`Dispatcher`](crate::dispatch::Dispatcher); the bus
/// holds one registered handler per node it is responsible for and calls it
/// for every inbound frame addressed there.
#[async_trait]
pub trait InboundHandler: Send + Sync {
    /// Handles one invocation addressed to this node.
    async fn handle(&self, invocation: Invocation) -> InvocationReply;
}

/// The cluster transport the core depends on but does not implement.
///
/// A production deployment backs this with whatever the surrounding system
/// already uses for inter-node RPC; [`InMemoryMessageBus`] is a reference
/// implementation simulating a cluster of named nodes inside one process,
/// used by the crate's own tests and demos.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Advertises that `node` supports `actor_type`, and installs the
    /// handler the bus delivers inbound invocations to.
    async fn register(&self, node: NodeId, actor_type: &str, handler: std::sync::Arc<dyn InboundHandler>);

    /// Lists nodes currently advertising support for `actor_type`.
    async fn nodes_supporting(&self, actor_type: &str) -> Vec<NodeId>;

    /// Per-key single-winner arbitration: the first caller to claim `key`
    /// wins; every later caller (cluster-wide) observes the same winner.
    async fn claim(&self, key: ActorRef, node: NodeId) -> Result<NodeId, BusError>;

    /// Releases a claim, e.g. when its incarnation is bumped after the
    /// current host is found unreachable.
    async fn release_claim(&self, key: &ActorRef);

    /// Sends `invocation` to `target` and awaits its reply.
    async fn send(&self, target: &NodeId, invocation: Invocation) -> Result<InvocationReply, BusError>;
}
