//! Utility types and helpers shared across the runtime.

pub mod identity;
pub mod ids;
pub mod serde_helpers;

pub use identity::{ActorIdentity, ActorRef};
pub use ids::{InstanceId, InvocationId, NodeId};
pub use serde_helpers::duration_serde;
