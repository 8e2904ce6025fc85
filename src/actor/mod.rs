//! The actor-authoring surface: the behavior contract, the per-instance
//! context handed to every hook and action, and the lifecycle state
//! machine the container drives instances through.
//!
//! This mod.rs file contains only module declarations and re-exports.
//! Implementation code lives in the individual module files:
//!
//! - `traits.rs` — [`ActorBehavior`] and [`ActionError`]
//! - `context.rs` — [`ActorContext`]
//! - `lifecycle.rs` — [`InstanceLifecycle`] and [`InstanceState`]

pub mod context;
pub mod lifecycle;
pub mod traits;

pub use context::ActorContext;
pub use lifecycle::{InstanceLifecycle, InstanceState};
pub use traits::{ActionError, ActorBehavior};
