//! Actor type names, identities, and the `ActorRef` that combines them.

// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// The ordered key that distinguishes one actor instance of a type from
/// another (e.g. `["orders", "42"]`). Must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorIdentity(Vec<String>);

impl ActorIdentity {
    /// Builds an identity from an ordered, non-empty sequence of segments.
    ///
    /// # Panics
    /// Panics if `segments` is empty; an actor always has at least one
    /// identity segment.
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        assert!(!segments.is_empty(), "ActorIdentity must not be empty");
        Self(segments)
    }

    /// Convenience constructor for the common single-segment case.
    pub fn single(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Returns the identity segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl Display for ActorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// The fully-qualified address of a virtual actor: its declared type name
/// plus the identity distinguishing one instance from its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorRef {
    actor_type: String,
    identity: ActorIdentity,
}

impl ActorRef {
    /// Builds a reference to an actor of `actor_type` identified by `identity`.
    pub fn new(actor_type: impl Into<String>, identity: ActorIdentity) -> Self {
        Self {
            actor_type: actor_type.into(),
            identity,
        }
    }

    /// The registered actor type name.
    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    /// The identity segments within the type.
    pub fn identity(&self) -> &ActorIdentity {
        &self.identity
    }
}

impl Display for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.actor_type, self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_single() {
        let id = ActorIdentity::single("42");
        assert_eq!(id.segments(), &["42".to_string()]);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_identity_multi_segment_display() {
        let id = ActorIdentity::new(["orders", "42"]);
        assert_eq!(id.to_string(), "orders/42");
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_identity_empty_panics() {
        let empty: Vec<String> = vec![];
        ActorIdentity::new(empty);
    }

    #[test]
    fn test_actor_ref_display() {
        let reference = ActorRef::new("Counter", ActorIdentity::single("k"));
        assert_eq!(reference.to_string(), "Counter/k");
        assert_eq!(reference.actor_type(), "Counter");
    }

    #[test]
    fn test_actor_ref_equality() {
        let a = ActorRef::new("Counter", ActorIdentity::single("k"));
        let b = ActorRef::new("Counter", ActorIdentity::single("k"));
        let c = ActorRef::new("Counter", ActorIdentity::single("j"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
