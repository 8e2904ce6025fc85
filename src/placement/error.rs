//! Placement-registry error types.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::bus::BusError;

/// Errors raised while resolving or claiming the host of a singular actor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// No node currently advertises support for the actor type.
    #[error("no node supports actor type: {0}")]
    NoHostAvailable(String),

    /// The transport failed while arbitrating the claim.
    #[error("claim failed: {0}")]
    ClaimFailed(#[from] BusError),
}

impl PlacementError {
    /// Whether retrying placement might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NoHostAvailable(_) => false,
            Self::ClaimFailed(e) => e.is_retriable(),
        }
    }
}
