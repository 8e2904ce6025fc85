//! Declarative actor type registration: how an actor type is constructed,
//! how its actions are locked, and how its instances are evicted.

pub mod registration;

pub use registration::{ActorKind, ActorTypeRegistration};
