//! `ActorContext`: the handle passed to every lifecycle hook and action
//! body, giving access to durable state, volatile timers, and the
//! surrounding runtime.

// Layer 1: Standard library imports
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::lock::ActionLock;
use crate::persistence::{PersistableCell, PersistenceKey};
use crate::system::handle::RuntimeHandle;
use crate::timer::{TimerService, VolatileTimer};
use crate::util::{ActorIdentity, ActorRef, InstanceId};

/// Per-instance handle threaded through `activate`, `deactivate`, and every
/// `handle_action` call.
///
/// Holds no actor state itself — only the plumbing an actor needs to reach
/// its durable cells, schedule volatile timers, and ask the container to
/// end its lifecycle early.
pub struct ActorContext {
    actor_ref: ActorRef,
    instance_id: InstanceId,
    runtime: Arc<RuntimeHandle>,
    lock: Arc<ActionLock>,
    timers: Arc<TimerService>,
    finalize_requested: Arc<AtomicBool>,
}

impl ActorContext {
    /// Assembled by the container at activation time.
    pub(crate) fn new(
        actor_ref: ActorRef,
        instance_id: InstanceId,
        runtime: Arc<RuntimeHandle>,
        lock: Arc<ActionLock>,
        timers: Arc<TimerService>,
        finalize_requested: Arc<AtomicBool>,
    ) -> Self {
        Self {
            actor_ref,
            instance_id,
            runtime,
            lock,
            timers,
            finalize_requested,
        }
    }

    /// The fully-qualified type and identity of this instance.
    pub fn actor_ref(&self) -> &ActorRef {
        &self.actor_ref
    }

    /// The instance's identity within its actor type.
    pub fn identity(&self) -> &ActorIdentity {
        self.actor_ref.identity()
    }

    /// The process-local id of this instance incarnation.
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    /// Opens a durable cell scoped to this instance under `sub_key`.
    ///
    /// Different sub-keys on the same instance address independent
    /// records, letting an actor keep more than one persistable cell (for
    /// example, a hot counter and a cold audit log) without them
    /// contending on the same version tag.
    pub fn persistent_cell<T>(&self, sub_key: impl Into<String>) -> PersistableCell<T> {
        let key = PersistenceKey::new(self.actor_ref.to_string(), sub_key);
        PersistableCell::new(Arc::clone(self.runtime.persistence_store()), key)
    }

    /// The node-wide services shared by every instance.
    pub fn runtime(&self) -> &Arc<RuntimeHandle> {
        &self.runtime
    }

    /// This instance's action gate, for code that needs to reason about
    /// lock state directly rather than through the dispatcher.
    pub fn lock(&self) -> &Arc<ActionLock> {
        &self.lock
    }

    /// Schedules a volatile timer that runs `action` under this instance's
    /// exclusive lock after `delay` elapses. Cancelled automatically on
    /// deactivation.
    pub fn new_volatile_timer<F>(&self, delay: Duration, action: F) -> VolatileTimer
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.timers.schedule(delay, action)
    }

    /// Asks the container to deactivate this instance once the current
    /// action returns, instead of waiting for an eviction policy to select
    /// it. The container checks this flag after the action completes.
    pub fn trigger_finalization(&self) {
        self.finalize_requested.store(true, Ordering::SeqCst);
    }

    /// Whether `trigger_finalization` has been called on this instance.
    pub(crate) fn finalization_requested(&self) -> bool {
        self.finalize_requested.load(Ordering::SeqCst)
    }

    /// Builds a context with fresh, unshared in-memory services, for use
    /// in actor-behavior unit tests that don't need a live container.
    pub fn for_test(actor_type: impl Into<String>, identity: ActorIdentity) -> Self {
        use crate::bus::InMemoryMessageBus;
        use crate::persistence::InMemoryPersistenceStore;
        use crate::placement::PlacementRegistry;
        use crate::system::config::RuntimeConfig;
        use crate::util::NodeId;

        let bus = Arc::new(InMemoryMessageBus::new());
        let runtime = Arc::new(RuntimeHandle::new(
            NodeId::new("test-node"),
            bus.clone(),
            Arc::new(PlacementRegistry::new(bus)),
            Arc::new(InMemoryPersistenceStore::new()),
            RuntimeConfig::default(),
        ));
        let lock = Arc::new(ActionLock::new());
        Self::new(
            ActorRef::new(actor_type, identity),
            InstanceId::new(),
            runtime,
            lock.clone(),
            Arc::new(TimerService::new(lock)),
            Arc::new(AtomicBool::new(false)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_persistent_cell_round_trips() {
        let ctx = ActorContext::for_test("Counter", ActorIdentity::single("a"));
        let mut cell = ctx.persistent_cell::<i64>("state");
        cell.load().await.unwrap();
        cell.change(7);
        cell.store(crate::persistence::StorePolicy::IfDirty)
            .await
            .unwrap();
        assert_eq!(cell.value(), Some(&7));
    }

    #[test]
    fn test_finalization_flag_round_trips() {
        let ctx = ActorContext::for_test("Counter", ActorIdentity::single("a"));
        assert!(!ctx.finalization_requested());
        ctx.trigger_finalization();
        assert!(ctx.finalization_requested());
    }
}
