//! The per-instance exclusive/shared/none action gate.

pub mod gate;

pub use gate::{ActionLock, LockClosed, LockGuard, LockMode};
