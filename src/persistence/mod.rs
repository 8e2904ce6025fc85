//! Durable per-instance state: the `PersistableCell` contract and its
//! external storage collaborator.

pub mod cell;
pub mod error;
pub mod store;

pub use cell::{PersistableCell, StorePolicy};
pub use error::PersistenceError;
pub use store::{InMemoryPersistenceStore, PersistenceKey, PersistenceStore, StoredRecord};
