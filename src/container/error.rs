//! Container-level error types.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::actor::ActionError;
use crate::lock::LockClosed;
use crate::util::ActorRef;

/// Errors raised while activating, dispatching to, or evicting a local
/// instance.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// No `ActorTypeRegistration` matches the requested type name.
    #[error("actor type not registered: {0}")]
    TypeNotRegistered(String),

    /// The factory or user `activate()` hook failed.
    #[error("activation failed for {actor_ref}: {source}")]
    ActivationFailed {
        /// The instance that failed to activate.
        actor_ref: ActorRef,
        /// The underlying activation failure.
        #[source]
        source: ActionError,
    },

    /// `without_instantiation()` was set and no instance is currently
    /// active for the target identity.
    #[error("instance not found: {0}")]
    InstanceNotFound(ActorRef),

    /// The requested action name is not declared by the actor type.
    #[error("action not supported: {0}")]
    ActionNotSupported(String),

    /// The instance has begun deactivating and rejects further actions.
    #[error("instance is deactivating: {0}")]
    Deactivating(ActorRef),

    /// The user `deactivate()` hook failed.
    #[error("deactivation failed for {actor_ref}: {source}")]
    DeactivationFailed {
        /// The instance that failed to deactivate cleanly.
        actor_ref: ActorRef,
        /// The underlying deactivation failure.
        #[source]
        source: ActionError,
    },

    /// The instance's action lock has been permanently closed.
    #[error("instance lock closed: {0}")]
    LockClosed(#[from] LockClosed),

    /// The user's action handler returned an application-level error.
    #[error("action error: {0}")]
    Action(#[from] ActionError),

    /// Capacity eviction could not make room for a new instance.
    #[error("container at capacity: {current}/{max}")]
    CapacityExceeded {
        /// Instances currently resident.
        current: usize,
        /// Configured capacity ceiling.
        max: usize,
    },
}

impl ContainerError {
    /// Whether retrying the same invocation against this (or another)
    /// instance might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Deactivating(_) | Self::LockClosed(_) | Self::CapacityExceeded { .. }
        )
    }

    /// Whether this failure stems from an instance not existing when the
    /// caller explicitly disallowed on-demand activation.
    pub fn is_instance_not_found(&self) -> bool {
        matches!(self, Self::InstanceNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ActorIdentity;

    #[test]
    fn test_type_not_registered_is_not_transient() {
        let err = ContainerError::TypeNotRegistered("Ghost".to_string());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_deactivating_is_transient() {
        let actor_ref = ActorRef::new("Counter", ActorIdentity::single("a"));
        let err = ContainerError::Deactivating(actor_ref);
        assert!(err.is_transient());
    }

    #[test]
    fn test_capacity_exceeded_display() {
        let err = ContainerError::CapacityExceeded { current: 10, max: 10 };
        assert!(err.to_string().contains("10/10"));
    }
}
