//! Prelude module for convenient imports.
//!
//! ```rust
//! use vactor::prelude::*;
//! ```

// Core actor lifecycle
pub use crate::actor::{ActionError, ActorBehavior, ActorContext, InstanceLifecycle, InstanceState};
pub use crate::container::{Container, ContainerError, EvictionReason, Instance};
pub use crate::lock::{ActionLock, LockGuard, LockMode};
pub use crate::persistence::{InMemoryPersistenceStore, PersistableCell, PersistenceError, PersistenceStore};
pub use crate::migration::{Migration, MigrationDriver};
pub use crate::timer::{PollController, TimerService, VolatileTimer};

// Placement and dispatch
pub use crate::bus::{BusError, InMemoryMessageBus, InboundHandler, MessageBus};
pub use crate::dispatch::Dispatcher;
pub use crate::invocation::{FrameworkErrorKind, Invocation, InvocationReply};
pub use crate::placement::{PlacementError, PlacementRegistry};
pub use crate::proxy::{ActionProxy, ProxyBackoff, ProxyError};
pub use crate::suite::{ActorKind, ActorTypeRegistration};

// Infrastructure
pub use crate::system::{Node, RuntimeConfig, RuntimeConfigBuilder, RuntimeError, RuntimeHandle};
pub use crate::util::{ActorIdentity, ActorRef, InstanceId, InvocationId, NodeId};

// Monitoring
pub use crate::monitoring::{InstanceEvent, InstanceEventKind, InstanceMonitor};
