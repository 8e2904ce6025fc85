//! Ordered, version-stamped, idempotent-under-replay state migrations.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde::{de::DeserializeOwned, Serialize};

// Layer 3: Internal module imports
use crate::persistence::{PersistableCell, PersistenceError, StorePolicy};

/// One named transformation of a cell's value, applied at most once.
///
/// `name` is an opaque, order-independent token: migrations are applied in
/// the order they were declared on the [`MigrationDriver`], not by
/// comparing names, and `name` is only used to record "already applied" in
/// the cell's envelope.
#[derive(Clone)]
pub struct Migration<T> {
    name: String,
    apply: Arc<dyn Fn(&mut T) + Send + Sync>,
}

impl<T> Migration<T> {
    /// Declares a migration named `name` that mutates the cell's value
    /// in place.
    pub fn new(name: impl Into<String>, apply: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }
}

/// Applies a declared, ordered list of [`Migration`]s to a
/// [`PersistableCell`] on activation.
///
/// Migrations already recorded in the cell's envelope are skipped, so a
/// process that dies mid-list and retries only reapplies what is missing —
/// the cell itself, not a separate ledger, is the source of truth for what
/// has run.
#[derive(Clone)]
pub struct MigrationDriver<T> {
    migrations: Vec<Migration<T>>,
}

impl<T> MigrationDriver<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Builds a driver with no migrations declared.
    pub fn new() -> Self {
        Self {
            migrations: Vec::new(),
        }
    }

    /// Appends a migration to the declared order.
    pub fn with_migration(
        mut self,
        name: impl Into<String>,
        apply: impl Fn(&mut T) + Send + Sync + 'static,
    ) -> Self {
        self.migrations.push(Migration::new(name, apply));
        self
    }

    /// Runs every not-yet-applied migration, in declared order, against
    /// `cell`. A cell with no value yet has nothing to migrate; migrations
    /// apply to it lazily once a value exists. Persists immediately if any
    /// migration ran, so a crash right after does not lose the record of
    /// what was applied.
    ///
    /// Returns the names of the migrations that ran, in declared order, so
    /// a caller with access to an [`crate::monitoring::InstanceMonitor`] can
    /// report `MigrationApplied` events; empty if nothing was due.
    pub async fn apply(&self, cell: &mut PersistableCell<T>) -> Result<Vec<String>, PersistenceError> {
        let mut applied = Vec::new();
        for migration in &self.migrations {
            if cell.applied_migrations().contains(&migration.name) {
                continue;
            }
            let Some(current) = cell.value().cloned() else {
                continue;
            };
            let mut next = current;
            (migration.apply)(&mut next);
            cell.change(next);
            cell.mark_migration_applied(migration.name.clone());
            applied.push(migration.name.clone());
        }
        if !applied.is_empty() {
            cell.store(StorePolicy::Always).await?;
        }
        Ok(applied)
    }
}

impl<T> Default for MigrationDriver<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
