//! `PlacementRegistry`: resolves which node hosts a singular actor and
//! tracks the incarnation counter for each placement decision.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::bus::MessageBus;
use crate::placement::error::PlacementError;
use crate::util::{ActorRef, NodeId};

/// Cluster-wide host mapping for actor types whose instances must be
/// singular (at most one live instance cluster-wide).
///
/// Placement decisions are arbitrated by the [`MessageBus`]'s claim
/// mechanism rather than held authoritatively here: the registry is a
/// thin, per-node cache of "who I last heard owns this actor" plus the
/// incarnation counter, which exists purely so callers can detect that a
/// placement moved since they last asked.
pub struct PlacementRegistry {
    bus: Arc<dyn MessageBus>,
    incarnations: DashMap<ActorRef, AtomicU64>,
    last_host: DashMap<ActorRef, NodeId>,
}

impl PlacementRegistry {
    /// Builds a registry backed by the given transport.
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        Self {
            bus,
            incarnations: DashMap::new(),
            last_host: DashMap::new(),
        }
    }

    /// Resolves the host node for `actor_ref`, claiming `candidate_node` as
    /// the winner if no node currently holds the claim.
    ///
    /// Bumps the incarnation counter whenever the resolved host differs
    /// from the last one this registry observed for `actor_ref` (including
    /// the first resolution).
    pub async fn resolve(
        &self,
        actor_ref: &ActorRef,
        candidate_node: NodeId,
    ) -> Result<NodeId, PlacementError> {
        let supporting = self.bus.nodes_supporting(actor_ref.actor_type()).await;
        if supporting.is_empty() {
            return Err(PlacementError::NoHostAvailable(
                actor_ref.actor_type().to_string(),
            ));
        }

        let winner = self
            .bus
            .claim(actor_ref.clone(), candidate_node)
            .await
            .map_err(PlacementError::ClaimFailed)?;

        let moved = match self.last_host.get(actor_ref) {
            Some(existing) => *existing.value() != winner,
            None => true,
        };
        if moved {
            self.last_host.insert(actor_ref.clone(), winner.clone());
            self.incarnations
                .entry(actor_ref.clone())
                .or_insert_with(|| AtomicU64::new(0))
                .fetch_add(1, Ordering::SeqCst);
        }

        Ok(winner)
    }

    /// Releases the claim, allowing a future `resolve` to place the actor
    /// on a different node (for example, after its host evicts it).
    pub async fn release(&self, actor_ref: &ActorRef) {
        self.bus.release_claim(actor_ref).await;
        self.last_host.remove(actor_ref);
    }

    /// The number of distinct placements observed for `actor_ref` so far.
    /// Zero if it has never been resolved.
    pub fn incarnation(&self, actor_ref: &ActorRef) -> u64 {
        self.incarnations
            .get(actor_ref)
            .map(|counter| counter.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}
