//! Errors raised by the persistence layer.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Failure modes for [`PersistableCell`](super::PersistableCell) operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// The backing store did not respond (network partition, outage).
    #[error("persistence store unavailable")]
    StorageUnavailable,

    /// Stored bytes could not be decoded into the cell's value type.
    #[error("persisted data is corrupt: {0}")]
    Corrupt(String),

    /// A compare-and-set write lost a race against a concurrent writer.
    #[error("storage conflict: expected version {expected:?}, found {found:?}")]
    StorageConflict {
        /// The version this write assumed was current.
        expected: Option<String>,
        /// The version the store actually held.
        found: Option<String>,
    },

    /// A read was attempted before `load()` ever completed successfully.
    #[error("persistable cell has not been loaded")]
    NotLoaded,
}

impl PersistenceError {
    /// Whether a caller may usefully retry the operation.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable | Self::StorageConflict { .. }
        )
    }
}
