//! The reply to an [`Invocation`](super::Invocation): success, an action
//! error, a framework error, or unreachability.

// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Distinguishes the kinds of failure the runtime itself can report, as
/// opposed to an error the action body raised.
///
/// See the error-handling design: each variant's retriability is fixed by
/// its kind, not by the caller's guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameworkErrorKind {
    /// The dispatcher's deadline elapsed before a reply arrived.
    Timeout,
    /// No node in the cluster advertises the requested actor type.
    NotSupported,
    /// The target instance's `activate` hook returned an error.
    ActivationFailed,
    /// The persistence store did not respond.
    StorageUnavailable,
    /// A compare-and-set write lost a race against a concurrent writer.
    StorageConflict,
    /// Persisted data could not be decoded.
    Corrupt,
    /// An error internal to the runtime that does not fit another kind.
    Internal(String),
}

impl FrameworkErrorKind {
    /// Whether a caller may usefully retry the invocation.
    ///
    /// Matches the error-handling table: `unreachable`/`timeout`/
    /// `activation-failed`/`storage-unavailable`/`storage-conflict` are
    /// retriable; `not-supported` and `corrupt` are not.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::ActivationFailed | Self::StorageUnavailable | Self::StorageConflict
        )
    }
}

impl Display for FrameworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::NotSupported => write!(f, "not-supported"),
            Self::ActivationFailed => write!(f, "activation-failed"),
            Self::StorageUnavailable => write!(f, "storage-unavailable"),
            Self::StorageConflict => write!(f, "storage-conflict"),
            Self::Corrupt => write!(f, "corrupt"),
            Self::Internal(msg) => write!(f, "internal: {msg}"),
        }
    }
}

/// The outcome of dispatching an [`Invocation`](super::Invocation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationReply {
    /// The action ran to completion; payload is its serialized result.
    Ok(Vec<u8>),
    /// The action body itself returned an error; payload is the serialized
    /// application-level error. Never retried by the runtime.
    ActionError(Vec<u8>),
    /// The runtime could not complete the invocation.
    FrameworkError(FrameworkErrorKind),
    /// The transport reports no route to the host that would serve this ref.
    Unreachable,
}

impl InvocationReply {
    /// Whether the caller should consider retrying.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Unreachable => true,
            Self::FrameworkError(kind) => kind.is_retriable(),
            Self::Ok(_) | Self::ActionError(_) => false,
        }
    }

    /// Returns the success payload, if this reply is `Ok`.
    pub fn into_ok(self) -> Option<Vec<u8>> {
        match self {
            Self::Ok(payload) => Some(payload),
            _ => None,
        }
    }
}
