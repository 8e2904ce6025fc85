//! `Container`: the per-node registry of live instances, driving their
//! activation, dispatch, and eviction.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::actor::{ActorBehavior, ActorContext, InstanceState};
use crate::container::error::ContainerError;
use crate::container::eviction::{self, EvictionReason};
use crate::container::instance::Instance;
use crate::invocation::Invocation;
use crate::lock::LockMode;
use crate::monitoring::{InstanceEvent, InstanceEventKind};
use crate::suite::{ActorKind, ActorTypeRegistration};
use crate::system::handle::RuntimeHandle;
use crate::util::ActorRef;

/// The per-node table of live instances, keyed by their fully-qualified
/// address. One `Container` serves every registered actor type on a node;
/// it is the local collaborator a [`crate::dispatch::Dispatcher`] hands
/// invocations to once placement has routed them to this node.
pub struct Container {
    runtime: Arc<RuntimeHandle>,
    registrations: DashMap<String, ActorTypeRegistration>,
    instances: DashMap<ActorRef, Arc<Instance>>,
}

impl Container {
    /// Builds an empty container sharing `runtime`'s services.
    pub fn new(runtime: Arc<RuntimeHandle>) -> Self {
        Self {
            runtime,
            registrations: DashMap::new(),
            instances: DashMap::new(),
        }
    }

    /// Registers an actor type. Replaces any prior registration of the
    /// same type name.
    pub fn register_type(&self, registration: ActorTypeRegistration) {
        self.registrations
            .insert(registration.actor_type().to_string(), registration);
    }

    /// Whether `actor_type` has a registration.
    pub fn supports(&self, actor_type: &str) -> bool {
        self.registrations.contains_key(actor_type)
    }

    /// The declared placement kind for `actor_type`, if registered. Callers
    /// building a proxy use this to decide whether an invocation must first
    /// resolve a cluster-wide placement or can stay on the local node.
    pub fn kind_of(&self, actor_type: &str) -> Option<ActorKind> {
        self.registrations.get(actor_type).map(|entry| entry.kind())
    }

    /// Total number of resident instances across every registered type.
    /// Used by graceful shutdown to decide whether draining is complete.
    pub fn total_instances(&self) -> usize {
        self.instances.len()
    }

    /// Number of instances currently resident for `actor_type`.
    pub fn resident_count(&self, actor_type: &str) -> usize {
        self.instances
            .iter()
            .filter(|entry| entry.key().actor_type() == actor_type)
            .count()
    }

    /// Runs the activation sequence (insert as `Activating`, construct,
    /// run the user `activate()` hook, transition to `Active`) and
    /// dispatches `invocation` against the resulting instance.
    ///
    /// Deactivating and dead instances reject every action outright,
    /// including `LockMode::None` actions that would otherwise bypass the
    /// gate — the state check below runs before the lock mode is even
    /// looked up.
    pub async fn dispatch(&self, invocation: Invocation) -> Result<Vec<u8>, ContainerError> {
        let actor_ref = invocation.actor_ref();
        let registration = self
            .registrations
            .get(invocation.actor_type())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ContainerError::TypeNotRegistered(invocation.actor_type().to_string()))?;

        let instance = self
            .resolve_instance(&registration, &actor_ref, invocation.instantiate_if_absent())
            .await?;
        self.ensure_activated(&registration, &instance).await?;

        let state = instance.state();
        if state == InstanceState::Deactivating || state == InstanceState::Dead {
            return Err(ContainerError::Deactivating(actor_ref));
        }

        let mode = registration.lock_mode_for(invocation.action());
        let guard = if mode != LockMode::None {
            if !instance.is_idle() {
                self.runtime
                    .monitor()
                    .record(InstanceEvent::new(
                        actor_ref.clone(),
                        InstanceEventKind::LockWaiting { mode: mode.to_string() },
                    ))
                    .await;
            }
            let guard = Arc::clone(instance.lock()).acquire(mode).await?;
            self.runtime
                .monitor()
                .record(InstanceEvent::new(
                    actor_ref.clone(),
                    InstanceEventKind::LockAcquired { mode: mode.to_string() },
                ))
                .await;
            Some(guard)
        } else {
            None
        };

        instance.mark_used();
        instance.record_invocation();

        let outcome = if mode == LockMode::Exclusive {
            let mut ctx = self.context_for(&instance);
            let mut behavior = instance.behavior().write().await;
            behavior
                .handle_action(invocation.action(), invocation.args(), &mut ctx)
                .await
        } else {
            let ctx = self.context_for(&instance);
            let behavior = instance.behavior().read().await;
            behavior
                .handle_concurrent_action(invocation.action(), invocation.args(), &ctx)
                .await
        };

        drop(guard);

        if instance.wants_finalization() {
            self.evict(actor_ref).await?;
        }

        outcome.map_err(ContainerError::Action)
    }

    /// Finds (or, if allowed, lazily creates) the instance for `actor_ref`.
    /// Construction is cheap and side-effect free by contract — the
    /// factory only builds the behavior object, `activate()` does the
    /// real work — so a lost race simply discards the loser's instance.
    async fn resolve_instance(
        &self,
        registration: &ActorTypeRegistration,
        actor_ref: &ActorRef,
        instantiate_if_absent: bool,
    ) -> Result<Arc<Instance>, ContainerError> {
        if let Some(entry) = self.instances.get(actor_ref) {
            return Ok(Arc::clone(entry.value()));
        }
        if !instantiate_if_absent {
            return Err(ContainerError::InstanceNotFound(actor_ref.clone()));
        }
        if let Some(capacity) = registration.capacity() {
            self.make_room(registration, capacity).await?;
        }
        let behavior = registration.construct();
        let fresh = Arc::new(Instance::new(actor_ref.clone(), behavior));
        let entry = self
            .instances
            .entry(actor_ref.clone())
            .or_insert_with(|| Arc::clone(&fresh));
        Ok(Arc::clone(entry.value()))
    }

    /// Evicts the least-recently-used idle instance of the same type if
    /// the type is already at `capacity`.
    async fn make_room(
        &self,
        registration: &ActorTypeRegistration,
        capacity: usize,
    ) -> Result<(), ContainerError> {
        let siblings: Vec<Arc<Instance>> = self
            .instances
            .iter()
            .filter(|entry| entry.key().actor_type() == registration.actor_type())
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        match eviction::select_capacity_victim(capacity, &siblings) {
            Some((victim, reason)) => {
                self.evict_with_reason(victim.actor_ref().clone(), reason).await
            }
            None => {
                if siblings.len() < capacity {
                    Ok(())
                } else {
                    Err(ContainerError::CapacityExceeded {
                        current: siblings.len(),
                        max: capacity,
                    })
                }
            }
        }
    }

    /// Runs `activate()` exactly once per instance. On success the
    /// instance transitions to `Active`. On failure it transitions to
    /// `Dead`, is dropped from the table immediately (so a retry builds a
    /// fresh instance rather than re-activating a corpse), and — for
    /// `Singular` types — its placement claim is released so a retry can
    /// relocate to a different node.
    async fn ensure_activated(
        &self,
        registration: &ActorTypeRegistration,
        instance: &Arc<Instance>,
    ) -> Result<(), ContainerError> {
        let inner = Arc::clone(instance);
        let runtime = Arc::clone(&self.runtime);
        let result = instance
            .activation_cell()
            .get_or_try_init(|| async move {
                inner.transition_to(InstanceState::Activating);
                let guard = Arc::clone(inner.lock())
                    .acquire(LockMode::Exclusive)
                    .await?;
                let activation_outcome = {
                    let mut ctx = ActorContext::new(
                        inner.actor_ref().clone(),
                        inner.instance_id(),
                        Arc::clone(&runtime),
                        Arc::clone(inner.lock()),
                        Arc::clone(inner.timers()),
                        Arc::clone(inner.finalize_requested()),
                    );
                    let mut behavior = inner.behavior().write().await;
                    behavior.activate(&mut ctx).await
                };
                drop(guard);

                match activation_outcome {
                    Ok(()) => {
                        inner.transition_to(InstanceState::Active);
                        runtime
                            .monitor()
                            .record(InstanceEvent::new(
                                inner.actor_ref().clone(),
                                InstanceEventKind::Activated,
                            ))
                            .await;
                        Ok::<(), ContainerError>(())
                    }
                    Err(source) => {
                        inner.transition_to(InstanceState::Dead);
                        runtime
                            .monitor()
                            .record(InstanceEvent::new(
                                inner.actor_ref().clone(),
                                InstanceEventKind::ActivationFailed {
                                    error: source.to_string(),
                                },
                            ))
                            .await;
                        Err(ContainerError::ActivationFailed {
                            actor_ref: inner.actor_ref().clone(),
                            source,
                        })
                    }
                }
            })
            .await
            .map(|_| ());

        if let Err(ContainerError::ActivationFailed { .. }) = &result {
            self.instances.remove(instance.actor_ref());
            if registration.kind() == ActorKind::Singular {
                self.runtime.placement().release(instance.actor_ref()).await;
            }
        }

        result
    }

    /// Drains in-flight work, runs the user `deactivate()` hook, and
    /// removes the instance from the table. Idempotent: evicting an
    /// already-dead or already-evicted instance is a no-op.
    pub async fn evict(&self, actor_ref: ActorRef) -> Result<(), ContainerError> {
        self.evict_with_reason(actor_ref, EvictionReason::Explicit).await
    }

    async fn evict_with_reason(
        &self,
        actor_ref: ActorRef,
        reason: EvictionReason,
    ) -> Result<(), ContainerError> {
        let instance = match self.instances.get(&actor_ref) {
            Some(entry) => Arc::clone(entry.value()),
            None => return Ok(()),
        };
        if instance.state() == InstanceState::Dead {
            return Ok(());
        }

        instance.transition_to(InstanceState::Deactivating);
        let guard = Arc::clone(instance.lock())
            .acquire(LockMode::Exclusive)
            .await?;
        instance.timers().cancel_all();
        let deactivation_outcome = {
            let mut ctx = self.context_for(&instance);
            let mut behavior = instance.behavior().write().await;
            behavior.deactivate(&mut ctx).await
        };
        drop(guard);

        if let Err(source) = deactivation_outcome {
            self.runtime
                .monitor()
                .record(InstanceEvent::new(
                    actor_ref.clone(),
                    InstanceEventKind::DeactivationFailed {
                        error: source.to_string(),
                    },
                ))
                .await;
            return Err(ContainerError::DeactivationFailed { actor_ref, source });
        }

        instance.lock().close();
        instance.transition_to(InstanceState::Dead);
        self.instances.remove(&actor_ref);
        self.runtime
            .monitor()
            .record(InstanceEvent::new(actor_ref.clone(), InstanceEventKind::Deactivated))
            .await;
        self.runtime
            .monitor()
            .record(InstanceEvent::new(
                actor_ref,
                InstanceEventKind::Evicted { reason: reason.label().to_string() },
            ))
            .await;
        Ok(())
    }

    /// Evicts every idle instance `max_age`/`max_idle` marks due, for every
    /// registered type. Intended to be driven by a periodic sweep task.
    pub async fn sweep_passive_evictions(&self) -> Vec<ActorRef> {
        let mut evicted = Vec::new();
        let type_names: Vec<String> = self
            .registrations
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        for actor_type in type_names {
            let registration = match self.registrations.get(&actor_type) {
                Some(entry) => entry.value().clone(),
                None => continue,
            };
            let siblings: Vec<Arc<Instance>> = self
                .instances
                .iter()
                .filter(|entry| entry.key().actor_type() == actor_type)
                .map(|entry| Arc::clone(entry.value()))
                .collect();
            for (instance, reason) in eviction::due_for_passive_eviction(&registration, &siblings) {
                let actor_ref = instance.actor_ref().clone();
                if self.evict_with_reason(actor_ref.clone(), reason).await.is_ok() {
                    evicted.push(actor_ref);
                }
            }
        }
        evicted
    }

    fn context_for(&self, instance: &Arc<Instance>) -> ActorContext {
        ActorContext::new(
            instance.actor_ref().clone(),
            instance.instance_id(),
            Arc::clone(&self.runtime),
            Arc::clone(instance.lock()),
            Arc::clone(instance.timers()),
            Arc::clone(instance.finalize_requested()),
        )
    }
}
