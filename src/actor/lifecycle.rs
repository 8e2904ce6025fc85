//! Instance lifecycle state machine.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY

// Layer 3: Internal module imports
// (none)

/// The state of one [`Instance`](crate::container::Instance) in its life.
///
/// ```text
/// New -> Activating -> Active -> Deactivating -> Dead
/// ```
/// Only `Active` accepts actions; `New` and `Activating` queue the first
/// caller behind the implicit activation lock; `Deactivating` drains
/// in-flight work before the instance is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    /// Registered in the container but activation has not started yet.
    New,
    /// Running the factory and the user `activate` hook.
    Activating,
    /// Serving actions normally.
    Active,
    /// Draining in-flight actions, running `deactivate`, flushing state.
    Deactivating,
    /// Terminal. The container has removed this instance from its map.
    Dead,
}

impl Default for InstanceState {
    fn default() -> Self {
        Self::New
    }
}

impl InstanceState {
    /// Whether this state accepts new action dispatch.
    pub fn accepts_actions(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Tracks state and timing for one instance across its life.
#[derive(Debug, Clone)]
pub struct InstanceLifecycle {
    state: InstanceState,
    created_at: DateTime<Utc>,
    last_transition: DateTime<Utc>,
    last_used: DateTime<Utc>,
}

impl InstanceLifecycle {
    /// Creates a lifecycle tracker freshly in the `New` state.
    pub fn new() -> Self {
        let now = Utc::now(); // §3.2
        Self {
            state: InstanceState::New,
            created_at: now,
            last_transition: now,
            last_used: now,
        }
    }

    /// Moves to `new_state`, recording the transition time.
    pub fn transition_to(&mut self, new_state: InstanceState) {
        self.state = new_state;
        self.last_transition = Utc::now(); // §3.2
    }

    /// Records that an action just completed, refreshing idle tracking.
    pub fn mark_used(&mut self) {
        self.last_used = Utc::now(); // §3.2
    }

    /// Current state.
    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// When the instance was first registered.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the state last changed.
    pub fn last_transition(&self) -> DateTime<Utc> {
        self.last_transition
    }

    /// When the instance last completed an action.
    pub fn last_used(&self) -> DateTime<Utc> {
        self.last_used
    }

    /// Age since creation.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at // §3.2
    }

    /// Idle time since the last completed action.
    pub fn idle_for(&self) -> chrono::Duration {
        Utc::now() - self.last_used // §3.2
    }
}

impl Default for InstanceLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_new() {
        let lifecycle = InstanceLifecycle::new();
        assert_eq!(lifecycle.state(), InstanceState::New);
        assert!(!lifecycle.state().accepts_actions());
    }

    #[test]
    fn test_transition_sequence() {
        let mut lifecycle = InstanceLifecycle::new();
        lifecycle.transition_to(InstanceState::Activating);
        lifecycle.transition_to(InstanceState::Active);
        assert!(lifecycle.state().accepts_actions());
        lifecycle.transition_to(InstanceState::Deactivating);
        assert!(!lifecycle.state().accepts_actions());
        lifecycle.transition_to(InstanceState::Dead);
        assert!(lifecycle.state().is_terminal());
    }

    #[test]
    fn test_mark_used_updates_idle() {
        let mut lifecycle = InstanceLifecycle::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        lifecycle.mark_used();
        assert!(lifecycle.idle_for() < chrono::Duration::seconds(1));
    }
}
