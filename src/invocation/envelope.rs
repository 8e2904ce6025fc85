//! The wire-level invocation: an action call addressed to an [`ActorRef`].

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; // §3.2 MANDATORY
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::{ActorIdentity, ActorRef, InvocationId};

/// Default invocation deadline when the caller does not specify one.
pub const DEFAULT_INVOCATION_TIMEOUT: Duration = Duration::from_secs(30);

/// An invocation of one action on one actor instance.
///
/// Carries everything the [`Dispatcher`](crate::dispatch::Dispatcher) needs
/// to locate (or instantiate) the target and everything the target action
/// needs to run: the serialized argument vector, a deadline, and a
/// correlation id the caller uses to match the eventual reply.
///
/// # Example
/// ```rust
/// use vactor::invocation::Invocation;
/// use vactor::util::ActorIdentity;
///
/// let inv = Invocation::new("Counter", ActorIdentity::single("k"), "inc", Vec::new());
/// assert_eq!(inv.action(), "inc");
/// assert!(inv.instantiate_if_absent());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    actor_type: String,
    identity: ActorIdentity,
    action: String,
    args: Vec<u8>,
    instantiate_if_absent: bool,
    correlation_id: InvocationId,
    created_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
}

impl Invocation {
    /// Builds an invocation with the default timeout and
    /// `instantiate_if_absent = true`, matching the default proxy behavior.
    pub fn new(
        actor_type: impl Into<String>,
        identity: ActorIdentity,
        action: impl Into<String>,
        args: Vec<u8>,
    ) -> Self {
        Self::with_timeout(actor_type, identity, action, args, DEFAULT_INVOCATION_TIMEOUT)
    }

    /// Builds an invocation with an explicit timeout.
    pub fn with_timeout(
        actor_type: impl Into<String>,
        identity: ActorIdentity,
        action: impl Into<String>,
        args: Vec<u8>,
        timeout: Duration,
    ) -> Self {
        let created_at = Utc::now(); // §3.2
        let deadline = created_at
            + chrono::Duration::from_std(timeout).unwrap_or_else(|_| chrono::Duration::zero());
        Self {
            actor_type: actor_type.into(),
            identity,
            action: action.into(),
            args,
            instantiate_if_absent: true,
            correlation_id: InvocationId::new(),
            created_at,
            deadline,
        }
    }

    /// Disables on-demand activation: if no instance is already active this
    /// invocation resolves to `not-supported` instead of creating one.
    pub fn without_instantiation(mut self) -> Self {
        self.instantiate_if_absent = false;
        self
    }

    /// The target actor's declared type name.
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    /// The target actor's identity.
    pub fn identity(&self) -> &ActorIdentity {
        &self.identity
    }

    /// The target [`ActorRef`].
    pub fn actor_ref(&self) -> ActorRef {
        ActorRef::new(self.actor_type.clone(), self.identity.clone())
    }

    /// The action name to invoke.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The serialized argument payload.
    pub fn args(&self) -> &[u8] {
        &self.args
    }

    /// Whether the dispatcher may create a fresh instance if none is active.
    pub fn instantiate_if_absent(&self) -> bool {
        self.instantiate_if_absent
    }

    /// The id a caller uses to match a reply back to this invocation.
    pub fn correlation_id(&self) -> InvocationId {
        self.correlation_id
    }

    /// Wall-clock deadline after which the dispatcher stops waiting.
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Whether `deadline` has already passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_defaults() {
        let inv = Invocation::new("Counter", ActorIdentity::single("k"), "inc", vec![1, 2]);
        assert_eq!(inv.actor_type(), "Counter");
        assert_eq!(inv.action(), "inc");
        assert_eq!(inv.args(), &[1, 2]);
        assert!(inv.instantiate_if_absent());
        assert!(!inv.is_expired());
    }

    #[test]
    fn test_without_instantiation() {
        let inv = Invocation::new("Counter", ActorIdentity::single("k"), "inc", vec![])
            .without_instantiation();
        assert!(!inv.instantiate_if_absent());
    }

    #[test]
    fn test_deadline_in_future() {
        let inv = Invocation::with_timeout(
            "Counter",
            ActorIdentity::single("k"),
            "inc",
            vec![],
            Duration::from_secs(5),
        );
        assert!(inv.deadline() > inv.created_at);
    }

    #[test]
    fn test_correlation_ids_unique() {
        let a = Invocation::new("Counter", ActorIdentity::single("k"), "inc", vec![]);
        let b = Invocation::new("Counter", ActorIdentity::single("k"), "inc", vec![]);
        assert_ne!(a.correlation_id(), b.correlation_id());
    }
}
