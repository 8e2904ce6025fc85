//! # vactor - A Virtual Actor Runtime
//!
//! Application code declares typed actor classes with asynchronous action
//! methods; the runtime materializes instances on demand across a cluster
//! of nodes, routes invocations to wherever an instance currently lives,
//! persists their state, and recycles them under memory or age pressure.
//! Invocation is location-transparent: callers obtain typed proxies and
//! invoke actions without knowing placement.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vactor::prelude::*;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct Counter(u64);
//!
//! #[async_trait]
//! impl ActorBehavior for Counter {
//!     async fn handle_action(
//!         &mut self,
//!         action: &str,
//!         _args: &[u8],
//!         _ctx: &mut ActorContext,
//!     ) -> Result<Vec<u8>, ActionError> {
//!         match action {
//!             "increment" => {
//!                 self.0 += 1;
//!                 Ok(self.0.to_le_bytes().to_vec())
//!             }
//!             other => Err(ActionError::from_display(format!("unknown action {other}"))),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let bus = Arc::new(InMemoryMessageBus::new());
//!     let node_id = NodeId::new("n1");
//!     let runtime = Arc::new(RuntimeHandle::new(
//!         node_id,
//!         bus.clone(),
//!         Arc::new(PlacementRegistry::new(bus)),
//!         Arc::new(InMemoryPersistenceStore::new()),
//!         RuntimeConfig::default(),
//!     ));
//!     let node = Node::new(runtime);
//!     node.register_type(ActorTypeRegistration::new(
//!         "Counter",
//!         ActorKind::Multiplar,
//!         || Box::new(Counter(0)),
//!     ))
//!     .await
//!     .unwrap();
//!
//!     let proxy = node.proxy(ActorRef::new("Counter", ActorIdentity::single("a")));
//!     proxy.call("increment", vec![]).await.unwrap();
//! }
//! ```
//!
//! # Module Organization
//!
//! ## Core actor lifecycle
//! - [`actor`] - `ActorBehavior`, `ActorContext`, instance lifecycle states
//! - [`container`] - Per-node instance registry: activation, dispatch, eviction
//! - [`lock`] - Per-instance FIFO exclusive/shared action gate
//! - [`persistence`] - Persistable state cells, the storage contract, migrations
//! - [`migration`] - Ordered, idempotent-under-replay schema migrations
//! - [`timer`] - Volatile per-instance timers cancelled on deactivation
//!
//! ## Placement and dispatch
//! - [`placement`] - Cluster-wide host resolution for singular actors
//! - [`dispatch`] - Translates invocations into container outcomes and replies
//! - [`proxy`] - Typed caller-facing handles with retry and backoff
//! - [`bus`] - The external transport collaborator interface
//! - [`invocation`] - The wire envelope and reply types
//! - [`suite`] - Declarative actor type registration
//!
//! ## Infrastructure
//! - [`system`] - `RuntimeConfig`, `RuntimeHandle`, `Node`, error types
//! - [`monitoring`] - Event tracking for observability
//! - [`util`] - `ActorRef`, `ActorIdentity`, `NodeId`, and other identifiers
//!
//! # Architecture Principles
//!
//! - **Type-erased container, typed actor authoring**: the container holds
//!   many heterogeneous actor types behind `Arc<dyn Fn>` factories and
//!   `Box<dyn ActorBehavior>`, while each actor's own `activate()` works
//!   against its own typed `PersistableCell<T>`.
//! - **FIFO fairness**: the per-instance lock never starves a queued
//!   exclusive acquirer behind a stream of shared ones.
//! - **Location transparency**: callers never see which node currently
//!   hosts a singular actor; `ActionProxy` retries across placement moves.

pub mod actor;
pub mod bus;
pub mod container;
pub mod dispatch;
pub mod invocation;
pub mod lock;
pub mod migration;
pub mod monitoring;
pub mod persistence;
pub mod placement;
pub mod proxy;
pub mod suite;
pub mod system;
pub mod timer;
pub mod util;

pub mod prelude;

// Re-export commonly used types
pub use actor::{ActionError, ActorBehavior, ActorContext, InstanceLifecycle, InstanceState};
pub use bus::{BusError, InMemoryMessageBus, InboundHandler, MessageBus};
pub use container::{Container, ContainerError, EvictionReason, Instance};
pub use dispatch::Dispatcher;
pub use invocation::{FrameworkErrorKind, Invocation, InvocationReply};
pub use lock::{ActionLock, LockClosed, LockGuard, LockMode};
pub use migration::{Migration, MigrationDriver};
pub use persistence::{InMemoryPersistenceStore, PersistableCell, PersistenceError, PersistenceStore};
pub use placement::{PlacementError, PlacementRegistry};
pub use proxy::{ActionProxy, ProxyBackoff, ProxyError};
pub use suite::{ActorKind, ActorTypeRegistration};
pub use system::{Node, RuntimeConfig, RuntimeConfigBuilder, RuntimeError, RuntimeHandle};
pub use timer::{PollController, TimerService, VolatileTimer};
pub use util::{ActorIdentity, ActorRef, InstanceId, InvocationId, NodeId};
