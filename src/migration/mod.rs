//! Versioned, ordered state migrations applied to persistable cells on
//! activation.

pub mod driver;

pub use driver::{Migration, MigrationDriver};
