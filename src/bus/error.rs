//! Errors surfaced by the message bus collaborator.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Transport-level failures, as distinct from an `InvocationReply` the
/// target node itself produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// No route to the target node (it never registered a listener, or the
    /// transport reports it unreachable).
    #[error("no route to node")]
    Unreachable,

    /// The bus itself timed out waiting for a reply, independent of any
    /// invocation-level deadline.
    #[error("bus send timed out")]
    Timeout,
}

impl BusError {
    /// Bus-level failures are always worth a re-placement retry.
    pub fn is_retriable(&self) -> bool {
        true
    }
}
