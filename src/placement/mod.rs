//! Cluster-wide placement for singular actor types.

pub mod error;
pub mod registry;

pub use error::PlacementError;
pub use registry::PlacementRegistry;
