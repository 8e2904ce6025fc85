//! An in-process reference `MessageBus` simulating a cluster of nodes.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};

// Layer 3: Internal module imports
use crate::bus::error::BusError;
use crate::bus::traits::{InboundHandler, MessageBus};
use crate::invocation::{Invocation, InvocationReply};
use crate::util::{ActorRef, NodeId};

/// A [`MessageBus`] that routes directly between in-process handlers.
///
/// Useful for single-binary deployments, demos, and the crate's own test
/// suite. Node registration and claim arbitration are both backed by
/// lock-free maps, matching the container/placement registries' choice of
/// `dashmap` for cluster-wide structures.
#[derive(Default)]
pub struct InMemoryMessageBus {
    support: DashMap<String, DashSet<NodeId>>,
    handlers: DashMap<NodeId, Arc<dyn InboundHandler>>,
    claims: DashMap<ActorRef, NodeId>,
}

impl InMemoryMessageBus {
    /// Builds an empty bus with no registered nodes.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageBus for InMemoryMessageBus {
    async fn register(&self, node: NodeId, actor_type: &str, handler: Arc<dyn InboundHandler>) {
        self.support
            .entry(actor_type.to_string())
            .or_default()
            .insert(node.clone());
        self.handlers.insert(node, handler);
    }

    async fn nodes_supporting(&self, actor_type: &str) -> Vec<NodeId> {
        self.support
            .get(actor_type)
            .map(|set| set.iter().map(|n| n.clone()).collect())
            .unwrap_or_default()
    }

    async fn claim(&self, key: ActorRef, node: NodeId) -> Result<NodeId, BusError> {
        let winner = self
            .claims
            .entry(key)
            .or_insert_with(|| node.clone())
            .clone();
        Ok(winner)
    }

    async fn release_claim(&self, key: &ActorRef) {
        self.claims.remove(key);
    }

    async fn send(
        &self,
        target: &NodeId,
        invocation: Invocation,
    ) -> Result<InvocationReply, BusError> {
        let handler = self
            .handlers
            .get(target)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(BusError::Unreachable)?;
        Ok(handler.handle(invocation).await)
    }
}
