//! Node-wide configuration, error types, and the `Node` entry point tying
//! the container, dispatcher, and bus registration together.

pub mod config;
pub mod errors;
pub mod handle;
pub mod node;

// Re-exports
pub use config::{RuntimeConfig, RuntimeConfigBuilder};
pub use errors::RuntimeError;
pub use handle::RuntimeHandle;
pub use node::Node;
