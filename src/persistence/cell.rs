//! `PersistableCell`: a typed durable slot owned by one actor instance.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde::{de::DeserializeOwned, Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::persistence::error::PersistenceError;
use crate::persistence::store::{PersistenceKey, PersistenceStore};

/// How aggressively [`PersistableCell::store`] writes through to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePolicy {
    /// Skip the write if the cell is not dirty.
    IfDirty,
    /// Write unconditionally.
    Always,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CellEnvelope<T> {
    value: T,
    /// Names of migrations already applied, consulted by
    /// [`crate::migration::MigrationDriver`].
    applied_migrations: Vec<String>,
}

/// A typed durable cell backed by a [`PersistenceStore`].
///
/// Two-phase use is typical: `load()` in `activate`, `store()` in
/// `deactivate`; the dirty flag means a `store()` with `StorePolicy::IfDirty`
/// after a read-only action is free.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use vactor::persistence::{InMemoryPersistenceStore, PersistableCell, PersistenceKey, StorePolicy};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = Arc::new(InMemoryPersistenceStore::new());
/// let key = PersistenceKey::new("Counter/k", "state");
/// let mut cell: PersistableCell<i64> = PersistableCell::new(store, key);
///
/// cell.load().await.unwrap();
/// assert_eq!(cell.value(), None);
///
/// cell.change(5);
/// cell.store(StorePolicy::IfDirty).await.unwrap();
/// assert_eq!(cell.value(), Some(&5));
/// # }
/// ```
pub struct PersistableCell<T> {
    store: Arc<dyn PersistenceStore>,
    key: PersistenceKey,
    version: Option<String>,
    dirty: bool,
    loaded: bool,
    cleared: bool,
    value: Option<T>,
    applied_migrations: Vec<String>,
}

impl<T> PersistableCell<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Builds an unloaded cell bound to `key` in `store`.
    pub fn new(store: Arc<dyn PersistenceStore>, key: PersistenceKey) -> Self {
        Self {
            store,
            key,
            version: None,
            dirty: false,
            loaded: false,
            cleared: false,
            value: None,
            applied_migrations: Vec::new(),
        }
    }

    /// Reads the current value from the store, replacing any in-memory
    /// value and clearing the dirty flag. Leaves `value()` as `None` if
    /// nothing has ever been stored for this key.
    pub async fn load(&mut self) -> Result<(), PersistenceError> {
        match self.store.get(&self.key).await? {
            Some(record) => {
                let envelope: CellEnvelope<T> = serde_json::from_slice(&record.payload)
                    .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
                self.value = Some(envelope.value);
                self.applied_migrations = envelope.applied_migrations;
                self.version = Some(record.version);
            }
            None => {
                self.value = None;
                self.applied_migrations = Vec::new();
                self.version = None;
            }
        }
        self.dirty = false;
        self.cleared = false;
        self.loaded = true;
        Ok(())
    }

    /// The current in-memory value, or `None` if never set.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The current value, failing if `load()` never completed.
    pub fn try_get_value(&self) -> Result<Option<&T>, PersistenceError> {
        if !self.loaded {
            return Err(PersistenceError::NotLoaded);
        }
        Ok(self.value.as_ref())
    }

    /// Sets the in-memory value and marks the cell dirty.
    pub fn change(&mut self, value: T) {
        self.value = Some(value);
        self.cleared = false;
        self.dirty = true;
    }

    /// Marks the cell dirty without changing the value, for callers that
    /// mutated the value in place through a borrow obtained elsewhere.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Marks the cell for deletion on the next `store()`.
    pub fn clear(&mut self) {
        self.value = None;
        self.cleared = true;
        self.dirty = true;
    }

    /// Whether the cell has unflushed changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Names of migrations already recorded as applied.
    pub fn applied_migrations(&self) -> &[String] {
        &self.applied_migrations
    }

    /// Records that `name` has been applied and marks the cell dirty, for
    /// use by [`crate::migration::MigrationDriver`].
    pub fn mark_migration_applied(&mut self, name: impl Into<String>) {
        self.applied_migrations.push(name.into());
        self.dirty = true;
    }

    /// Flushes the in-memory value per `policy`. Clears the dirty flag and
    /// advances the version tag on success.
    pub async fn store(&mut self, policy: StorePolicy) -> Result<(), PersistenceError> {
        if policy == StorePolicy::IfDirty && !self.dirty {
            return Ok(());
        }

        if self.cleared {
            self.store
                .delete(&self.key, self.version.as_deref())
                .await?;
            self.version = None;
            self.dirty = false;
            self.cleared = false;
            return Ok(());
        }

        let Some(value) = self.value.clone() else {
            self.dirty = false;
            return Ok(());
        };

        let envelope = CellEnvelope {
            value,
            applied_migrations: self.applied_migrations.clone(),
        };
        let payload = serde_json::to_vec(&envelope)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        let new_version = self
            .store
            .put(&self.key, payload, self.version.as_deref())
            .await?;
        self.version = Some(new_version);
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::InMemoryPersistenceStore;

    fn cell() -> PersistableCell<i64> {
        let store = Arc::new(InMemoryPersistenceStore::new());
        PersistableCell::new(store, PersistenceKey::new("Counter/k", "state"))
    }

    #[tokio::test]
    async fn test_load_on_empty_store() {
        let mut c = cell();
        c.load().await.unwrap();
        assert_eq!(c.value(), None);
        assert!(!c.is_dirty());
    }

    #[tokio::test]
    async fn test_change_then_store_then_reload() {
        let mut c = cell();
        c.load().await.unwrap();
        c.change(42);
        assert!(c.is_dirty());
        c.store(StorePolicy::IfDirty).await.unwrap();
        assert!(!c.is_dirty());

        c.load().await.unwrap();
        assert_eq!(c.value(), Some(&42));
    }

    #[tokio::test]
    async fn test_store_if_dirty_skips_clean_write() {
        let mut c = cell();
        c.load().await.unwrap();
        // Never dirtied; store(IfDirty) is a no-op, no version assigned.
        c.store(StorePolicy::IfDirty).await.unwrap();
        c.load().await.unwrap();
        assert_eq!(c.value(), None);
    }

    #[tokio::test]
    async fn test_try_get_value_before_load_fails() {
        let c = cell();
        assert!(matches!(
            c.try_get_value(),
            Err(PersistenceError::NotLoaded)
        ));
    }

    #[tokio::test]
    async fn test_clear_then_store_deletes() {
        let mut c = cell();
        c.load().await.unwrap();
        c.change(1);
        c.store(StorePolicy::Always).await.unwrap();

        c.clear();
        c.store(StorePolicy::Always).await.unwrap();

        c.load().await.unwrap();
        assert_eq!(c.value(), None);
    }

    #[tokio::test]
    async fn test_migration_tracking_round_trips() {
        let mut c = cell();
        c.load().await.unwrap();
        c.change(1);
        c.mark_migration_applied("v1");
        c.store(StorePolicy::Always).await.unwrap();

        c.load().await.unwrap();
        assert_eq!(c.applied_migrations(), &["v1".to_string()]);
    }
}
