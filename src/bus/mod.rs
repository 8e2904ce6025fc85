//! The transport/message bus collaborator: node registration, claim
//! arbitration for singular placement, and invocation delivery.

pub mod error;
pub mod in_memory;
pub mod traits;

pub use error::BusError;
pub use in_memory::InMemoryMessageBus;
pub use traits::{InboundHandler, MessageBus};
