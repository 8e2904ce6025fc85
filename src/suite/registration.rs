//! `ActorTypeRegistration`: the declarative description of one actor type
//! the container and placement registry act on.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::ActorBehavior;
use crate::lock::LockMode;

/// Whether a cluster ever runs more than one live instance of an actor
/// type's identity at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    /// At most one instance of a given identity is live cluster-wide;
    /// resolved through [`crate::placement::PlacementRegistry`].
    Singular,
    /// Any number of nodes may run an instance of a given identity
    /// concurrently; dispatch never leaves the caller's local node.
    Multiplar,
}

type Factory = dyn Fn() -> Box<dyn ActorBehavior> + Send + Sync;

/// The registration record for one actor type: how to construct it, how
/// its actions are locked, and its eviction policy.
///
/// Factories are type-erased (`Arc<dyn Fn() -> Box<dyn ActorBehavior>>`)
/// rather than generic, because one [`crate::container::Container`] holds
/// many actor types side by side in a single routing table — the
/// zero-cost-generic style used for single-type collaborators elsewhere in
/// this codebase doesn't fit a table that is heterogeneous by construction.
#[derive(Clone)]
pub struct ActorTypeRegistration {
    actor_type: String,
    kind: ActorKind,
    factory: Arc<Factory>,
    default_lock_mode: LockMode,
    lock_overrides: HashMap<String, LockMode>,
    capacity: Option<usize>,
    max_age: Option<Duration>,
    max_idle: Option<Duration>,
}

impl ActorTypeRegistration {
    /// Starts a registration for `actor_type`, constructed by `factory`.
    pub fn new<F>(actor_type: impl Into<String>, kind: ActorKind, factory: F) -> Self
    where
        F: Fn() -> Box<dyn ActorBehavior> + Send + Sync + 'static,
    {
        Self {
            actor_type: actor_type.into(),
            kind,
            factory: Arc::new(factory),
            default_lock_mode: LockMode::Exclusive,
            lock_overrides: HashMap::new(),
            capacity: None,
            max_age: None,
            max_idle: None,
        }
    }

    /// Overrides the lock mode used for actions with no explicit entry.
    /// Defaults to `Exclusive`, the conservative choice.
    pub fn with_default_lock_mode(mut self, mode: LockMode) -> Self {
        self.default_lock_mode = mode;
        self
    }

    /// Declares the lock mode for one named action.
    pub fn with_action_lock(mut self, action: impl Into<String>, mode: LockMode) -> Self {
        self.lock_overrides.insert(action.into(), mode);
        self
    }

    /// Caps resident instances of this type; the container evicts the
    /// least-recently-used idle instance to admit a new one past this.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Evicts an instance once it has been alive this long, regardless of
    /// use.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Evicts an instance once it has gone unused for this long.
    pub fn with_max_idle(mut self, max_idle: Duration) -> Self {
        self.max_idle = Some(max_idle);
        self
    }

    /// The registered type name.
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    /// Singular or multiplar placement.
    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Constructs a fresh behavior instance.
    pub fn construct(&self) -> Box<dyn ActorBehavior> {
        (self.factory)()
    }

    /// The lock mode declared for `action`, falling back to the type's
    /// default when the action has no explicit entry.
    pub fn lock_mode_for(&self, action: &str) -> LockMode {
        self.lock_overrides
            .get(action)
            .copied()
            .unwrap_or(self.default_lock_mode)
    }

    /// Resident-instance cap, if configured.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Max-age eviction threshold, if configured.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Max-idle eviction threshold, if configured.
    pub fn max_idle(&self) -> Option<Duration> {
        self.max_idle
    }
}
