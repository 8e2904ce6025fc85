//! The external collaborator interface for durable storage.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::persistence::error::PersistenceError;

/// Identifies one durable record: the owning actor's partition plus a
/// caller-chosen sort key distinguishing multiple cells on the same actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersistenceKey {
    partition: String,
    sort_key: String,
}

impl PersistenceKey {
    /// Builds a key from an actor partition (typically `"{type}/{identity}"`)
    /// and a cell-local sort key.
    pub fn new(partition: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort_key: sort_key.into(),
        }
    }
}

/// A stored value paired with the version the store assigned it.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    /// Opaque serialized payload.
    pub payload: Vec<u8>,
    /// Version tag, used for compare-and-set on the next write.
    pub version: String,
}

/// The durable storage contract actors' [`PersistableCell`](super::PersistableCell)s
/// are built on.
///
/// Out of the runtime core's scope: a real implementation talks to whatever
/// table store or key-value service the deployment already uses. This trait
/// is the seam; [`InMemoryPersistenceStore`] is a reference implementation
/// used by the crate's own tests.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Reads the current record, or `None` if nothing has been stored yet.
    async fn get(&self, key: &PersistenceKey) -> Result<Option<StoredRecord>, PersistenceError>;

    /// Writes `payload`, optionally requiring the current version to match
    /// `expected_version` (compare-and-set). Returns the new version.
    async fn put(
        &self,
        key: &PersistenceKey,
        payload: Vec<u8>,
        expected_version: Option<&str>,
    ) -> Result<String, PersistenceError>;

    /// Deletes the record, honoring the same CAS contract as `put`.
    async fn delete(
        &self,
        key: &PersistenceKey,
        expected_version: Option<&str>,
    ) -> Result<(), PersistenceError>;
}

/// An in-process, in-memory [`PersistenceStore`] used for tests and demos.
///
/// Versions are monotonically increasing integers rendered as strings, so
/// CAS comparisons are exact string equality.
#[derive(Debug, Default)]
pub struct InMemoryPersistenceStore {
    records: DashMap<PersistenceKey, StoredRecord>,
    version_counter: AtomicU64,
}

impl InMemoryPersistenceStore {
    /// Builds an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_version(&self) -> String {
        self.version_counter.fetch_add(1, Ordering::SeqCst).to_string()
    }
}

#[async_trait]
impl PersistenceStore for InMemoryPersistenceStore {
    async fn get(&self, key: &PersistenceKey) -> Result<Option<StoredRecord>, PersistenceError> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(
        &self,
        key: &PersistenceKey,
        payload: Vec<u8>,
        expected_version: Option<&str>,
    ) -> Result<String, PersistenceError> {
        let current = self.records.get(key).map(|entry| entry.version.clone());
        if let Some(expected) = expected_version {
            if current.as_deref() != Some(expected) {
                return Err(PersistenceError::StorageConflict {
                    expected: Some(expected.to_string()),
                    found: current,
                });
            }
        }
        let version = self.next_version();
        self.records.insert(
            key.clone(),
            StoredRecord {
                payload,
                version: version.clone(),
            },
        );
        Ok(version)
    }

    async fn delete(
        &self,
        key: &PersistenceKey,
        expected_version: Option<&str>,
    ) -> Result<(), PersistenceError> {
        let current = self.records.get(key).map(|entry| entry.version.clone());
        if let Some(expected) = expected_version {
            if current.as_deref() != Some(expected) {
                return Err(PersistenceError::StorageConflict {
                    expected: Some(expected.to_string()),
                    found: current,
                });
            }
        }
        self.records.remove(key);
        Ok(())
    }
}
