//! `Instance`: one live actor object resident on this node.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tokio::sync::{OnceCell, RwLock as AsyncRwLock};

// Layer 3: Internal module imports
use crate::actor::{ActorBehavior, InstanceLifecycle, InstanceState};
use crate::lock::ActionLock;
use crate::timer::TimerService;
use crate::util::{ActorRef, InstanceId};

/// A live actor object on one node: its address, lifecycle state, action
/// gate, volatile timers, and the boxed behavior itself.
///
/// The behavior is held behind an async `RwLock` rather than bare `&mut`
/// access because the [`ActionLock`] governs *admission* (how many actions
/// may be in flight for a given mode), not direct access to user code:
/// `Exclusive` actions (and activation/deactivation) take the write side
/// and call `handle_action`; `Shared`/`None` actions take the read side and
/// call `handle_concurrent_action`, so many of them — including ones
/// already suspended in a long-poll wait — can be in flight on the same
/// instance at once without blocking each other or a would-be `Exclusive`
/// caller indefinitely.
pub struct Instance {
    actor_ref: ActorRef,
    instance_id: InstanceId,
    lifecycle: parking_lot::Mutex<InstanceLifecycle>,
    lock: Arc<ActionLock>,
    timers: Arc<TimerService>,
    behavior: AsyncRwLock<Box<dyn ActorBehavior>>,
    finalize_requested: Arc<AtomicBool>,
    invocation_count: AtomicU64,
    activated: OnceCell<()>,
}

impl Instance {
    /// Wraps a freshly-constructed behavior as a `New` instance. The
    /// container transitions it through `Activating`/`Active` as part of
    /// its activation sequence.
    pub fn new(actor_ref: ActorRef, behavior: Box<dyn ActorBehavior>) -> Self {
        let lock = Arc::new(ActionLock::new());
        Self {
            actor_ref,
            instance_id: InstanceId::new(),
            lifecycle: parking_lot::Mutex::new(InstanceLifecycle::new()),
            timers: Arc::new(TimerService::new(Arc::clone(&lock))),
            lock,
            behavior: AsyncRwLock::new(behavior),
            finalize_requested: Arc::new(AtomicBool::new(false)),
            invocation_count: AtomicU64::new(0),
            activated: OnceCell::new(),
        }
    }

    /// The one-shot cell the container uses to run `activate()` exactly
    /// once per instance, regardless of how many concurrent callers raced
    /// to create it.
    pub fn activation_cell(&self) -> &OnceCell<()> {
        &self.activated
    }

    /// The instance's address.
    pub fn actor_ref(&self) -> &ActorRef {
        &self.actor_ref
    }

    /// The process-local incarnation id.
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    /// The instance's action gate.
    pub fn lock(&self) -> &Arc<ActionLock> {
        &self.lock
    }

    /// The instance's volatile timer scheduler.
    pub fn timers(&self) -> &Arc<TimerService> {
        &self.timers
    }

    /// The flag `ActorContext::trigger_finalization` sets.
    pub fn finalize_requested(&self) -> &Arc<AtomicBool> {
        &self.finalize_requested
    }

    /// Whether finalization has been requested by the instance itself.
    pub fn wants_finalization(&self) -> bool {
        self.finalize_requested.load(Ordering::SeqCst)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InstanceState {
        self.lifecycle.lock().state()
    }

    /// Moves the lifecycle state machine forward.
    pub fn transition_to(&self, state: InstanceState) {
        self.lifecycle.lock().transition_to(state);
    }

    /// Stamps the last-used timestamp, consulted by idle eviction.
    pub fn mark_used(&self) {
        self.lifecycle.lock().mark_used();
    }

    /// Age since construction, consulted by max-age eviction.
    pub fn age(&self) -> chrono::Duration {
        self.lifecycle.lock().age()
    }

    /// Time since last use, consulted by max-idle eviction.
    pub fn idle_for(&self) -> chrono::Duration {
        self.lifecycle.lock().idle_for()
    }

    /// Total actions dispatched to this instance since activation.
    pub fn invocation_count(&self) -> u64 {
        self.invocation_count.load(Ordering::SeqCst)
    }

    /// Bumps the invocation counter; called once per dispatched action.
    pub fn record_invocation(&self) {
        self.invocation_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Locked access to the boxed behavior, for activation/action/
    /// deactivation hooks. Callers pick `.write()` for `Exclusive` access
    /// (and activation/deactivation) or `.read()` for `Shared`/`None`
    /// concurrent-mode access.
    pub fn behavior(&self) -> &AsyncRwLock<Box<dyn ActorBehavior>> {
        &self.behavior
    }

    /// Whether the gate has no holders and no queued waiters — the
    /// precondition for evicting this instance.
    pub fn is_idle(&self) -> bool {
        self.lock.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActionError, ActorContext};
    use crate::util::ActorIdentity;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl ActorBehavior for Noop {
        async fn handle_action(
            &mut self,
            _action: &str,
            _args: &[u8],
            _ctx: &mut ActorContext,
        ) -> Result<Vec<u8>, ActionError> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_new_instance_starts_in_new_state() {
        let actor_ref = ActorRef::new("Counter", ActorIdentity::single("a"));
        let instance = Instance::new(actor_ref, Box::new(Noop));
        assert_eq!(instance.state(), InstanceState::New);
        assert!(instance.is_idle());
        assert_eq!(instance.invocation_count(), 0);
    }

    #[test]
    fn test_finalize_flag_starts_false() {
        let actor_ref = ActorRef::new("Counter", ActorIdentity::single("a"));
        let instance = Instance::new(actor_ref, Box::new(Noop));
        assert!(!instance.wants_finalization());
    }
}
