//! `Node`: the per-process entry point tying the container, dispatcher,
//! and bus registration together, plus graceful shutdown.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::RwLock;
use tokio::time::{sleep, timeout};

// Layer 3: Internal module imports
use crate::container::Container;
use crate::dispatch::Dispatcher;
use crate::proxy::ActionProxy;
use crate::suite::{ActorKind, ActorTypeRegistration};
use crate::system::errors::RuntimeError;
use crate::system::handle::RuntimeHandle;
use crate::util::ActorRef;

/// A node's run state, checked before accepting new registrations or
/// handing off new work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Running,
    ShuttingDown,
    Stopped,
}

/// One process's share of the runtime: a [`Container`] holding its live
/// instances, a [`Dispatcher`] the bus delivers inbound invocations to,
/// and the shared [`RuntimeHandle`] both collaborators and every
/// [`ActionProxy`] this node hands out reach through.
///
/// Registering an actor type both teaches the local container how to
/// construct and lock it, and advertises this node to the bus as a
/// candidate host, mirroring the donor's actor-system entry point except
/// that actors here are addressed by identity, not by a spawned handle.
pub struct Node {
    runtime: Arc<RuntimeHandle>,
    container: Arc<Container>,
    dispatcher: Arc<Dispatcher>,
    state: RwLock<NodeState>,
}

impl Node {
    /// Builds a node around `runtime`, with an empty container and a
    /// dispatcher honoring `runtime.config().dispatch_retries`.
    pub fn new(runtime: Arc<RuntimeHandle>) -> Self {
        let container = Arc::new(Container::new(Arc::clone(&runtime)));
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&container),
            runtime.config().dispatch_retries,
        ));
        Self {
            runtime,
            container,
            dispatcher,
            state: RwLock::new(NodeState::Running),
        }
    }

    /// The services shared with every instance and proxy this node hands
    /// out.
    pub fn runtime(&self) -> &Arc<RuntimeHandle> {
        &self.runtime
    }

    /// The local instance registry, for direct inspection in tests and
    /// demos.
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// Registers `registration` with the local container and advertises
    /// this node as a host for its actor type over the bus.
    pub async fn register_type(&self, registration: ActorTypeRegistration) -> Result<(), RuntimeError> {
        if *self.state.read() != NodeState::Running {
            return Err(RuntimeError::ShuttingDown);
        }
        let actor_type = registration.actor_type().to_string();
        self.container.register_type(registration);
        self.runtime
            .bus()
            .register(self.runtime.node_id().clone(), &actor_type, Arc::clone(&self.dispatcher) as _)
            .await;
        Ok(())
    }

    /// Builds a caller-facing handle for `actor_ref`. Routed locally for a
    /// `Multiplar` type, or through placement for a `Singular` one;
    /// unregistered types default to `Multiplar` and surface their real
    /// error on the first `call`.
    pub fn proxy(&self, actor_ref: ActorRef) -> ActionProxy {
        let kind = self
            .container
            .kind_of(actor_ref.actor_type())
            .unwrap_or(ActorKind::Multiplar);
        ActionProxy::new(Arc::clone(&self.runtime), actor_ref, kind)
    }

    /// Whether the node is still accepting new dispatch.
    pub fn is_running(&self) -> bool {
        *self.state.read() == NodeState::Running
    }

    /// Begins graceful shutdown: stops accepting new registrations and
    /// waits up to `runtime.config().shutdown_timeout` for every resident
    /// instance to drain naturally (finalized by in-flight actions or
    /// passive eviction) before forcing eviction of whatever remains.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        {
            let mut state = self.state.write();
            if *state != NodeState::Running {
                return Err(RuntimeError::ShuttingDown);
            }
            *state = NodeState::ShuttingDown;
        }

        let deadline = self.runtime.config().shutdown_timeout;
        let drained = timeout(deadline, self.wait_for_drain()).await;

        *self.state.write() = NodeState::Stopped;
        match drained {
            Ok(()) => Ok(()),
            Err(_) => Err(RuntimeError::ShutdownTimeout(deadline)),
        }
    }

    async fn wait_for_drain(&self) {
        loop {
            self.container.sweep_passive_evictions().await;
            if self.container.total_instances() == 0 {
                break;
            }
            sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}
