//! The error a caller sees after a proxy call exhausts its retry budget.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::invocation::FrameworkErrorKind;
use crate::placement::PlacementError;

/// The outcome of an [`crate::proxy::ActionProxy`] call that did not
/// succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    /// The action body itself returned an error.
    #[error("action error")]
    Action(Vec<u8>),
    /// The runtime reported a framework-level failure.
    #[error("framework error: {0}")]
    Framework(FrameworkErrorKind),
    /// Resolving the singular instance's host failed.
    #[error("placement error: {0}")]
    Placement(#[from] PlacementError),
    /// Every retry was exhausted without a route to the target.
    #[error("unreachable after exhausting retries")]
    Unreachable,
}

impl ProxyError {
    /// Returns the application payload, if this was an action error.
    pub fn into_action_payload(self) -> Option<Vec<u8>> {
        match self {
            Self::Action(payload) => Some(payload),
            _ => None,
        }
    }
}
