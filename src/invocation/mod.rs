//! Invocation wire types: the request addressed to an actor action and the
//! reply it produces.

pub mod envelope;
pub mod reply;

pub use envelope::{Invocation, DEFAULT_INVOCATION_TIMEOUT};
pub use reply::{FrameworkErrorKind, InvocationReply};
