//! Node-level error types.

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::bus::BusError;
use crate::container::ContainerError;
use crate::placement::PlacementError;
use crate::util::ActorRef;

/// Node-level errors surfaced by [`crate::system::Node`] operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// No actor type registration matches the requested type name.
    #[error("actor type not registered: {0}")]
    TypeNotRegistered(String),

    /// The container reported a failure dispatching to a local instance.
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// The placement registry could not resolve or claim a host.
    #[error("placement error: {0}")]
    Placement(#[from] PlacementError),

    /// The transport reported a failure independent of placement.
    #[error("bus error: {0}")]
    Bus(#[from] BusError),

    /// The node is shutting down and rejects new dispatch.
    #[error("node is shutting down")]
    ShuttingDown,

    /// Graceful shutdown did not drain in-flight work in time.
    #[error("shutdown timed out after {0:?}")]
    ShutdownTimeout(Duration),

    /// Configuration failed validation.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl RuntimeError {
    /// Whether retrying the same invocation might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Container(e) => e.is_transient(),
            Self::Placement(e) => e.is_transient(),
            Self::Bus(e) => e.is_retriable(),
            Self::ShuttingDown | Self::ShutdownTimeout(_) => false,
            Self::TypeNotRegistered(_) | Self::ConfigError(_) => false,
        }
    }

    /// Convenience constructor naming the unregistered type.
    pub fn unregistered(actor_ref: &ActorRef) -> Self {
        Self::TypeNotRegistered(actor_ref.actor_type().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_not_registered_display() {
        let err = RuntimeError::TypeNotRegistered("Counter".to_string());
        assert!(err.to_string().contains("Counter"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_shutting_down_is_not_transient() {
        assert!(!RuntimeError::ShuttingDown.is_transient());
    }

    #[test]
    fn test_bus_error_conversion() {
        let err: RuntimeError = BusError::Unreachable.into();
        assert!(matches!(err, RuntimeError::Bus(_)));
        assert!(err.is_transient());
    }
}
