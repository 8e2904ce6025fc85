//! Events for the virtual-actor lifecycle: activation, deactivation,
//! eviction, lock acquisition, placement nomination, and migration.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};
use crate::util::ActorRef;

/// Events related to one instance's lifecycle and the services acting on
/// its behalf (lock, placement, migration).
#[derive(Debug, Clone, Serialize)]
pub struct InstanceEvent {
    /// Timestamp when event occurred.
    pub timestamp: DateTime<Utc>,

    /// The instance the event concerns.
    pub actor_ref: ActorRef,

    /// Specific instance event type.
    pub event_kind: InstanceEventKind,

    /// Additional event metadata.
    pub metadata: HashMap<String, String>,
}

impl InstanceEvent {
    /// Builds an event stamped with the current time and no extra
    /// metadata, the shape every emission site in the runtime needs.
    pub fn new(actor_ref: ActorRef, event_kind: InstanceEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            actor_ref,
            event_kind,
            metadata: HashMap::new(),
        }
    }
}

impl MonitoringEvent for InstanceEvent {
    const EVENT_TYPE: &'static str = "instance";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            InstanceEventKind::Activated => EventSeverity::Info,
            InstanceEventKind::ActivationFailed { .. } => EventSeverity::Error,
            InstanceEventKind::Deactivated => EventSeverity::Info,
            InstanceEventKind::DeactivationFailed { .. } => EventSeverity::Error,
            InstanceEventKind::Evicted { .. } => EventSeverity::Debug,
            InstanceEventKind::LockAcquired { .. } => EventSeverity::Trace,
            InstanceEventKind::LockWaiting { .. } => EventSeverity::Debug,
            InstanceEventKind::PlacementResolved { .. } => EventSeverity::Info,
            InstanceEventKind::MigrationApplied { .. } => EventSeverity::Info,
        }
    }
}

/// Specific types of instance lifecycle events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum InstanceEventKind {
    /// The instance finished its activation sequence.
    Activated,

    /// The `activate()` hook returned an error.
    ActivationFailed {
        /// Error message from the hook.
        error: String,
    },

    /// The instance finished its deactivation sequence and was removed.
    Deactivated,

    /// The `deactivate()` hook returned an error.
    DeactivationFailed {
        /// Error message from the hook.
        error: String,
    },

    /// The instance was evicted from its container.
    Evicted {
        /// Why the eviction happened (capacity, max-age, max-idle, explicit).
        reason: String,
    },

    /// An action acquired the instance's lock.
    LockAcquired {
        /// The lock mode acquired (`exclusive`, `shared`, `none`).
        mode: String,
    },

    /// An action is queued waiting for the instance's lock.
    LockWaiting {
        /// The lock mode being waited for.
        mode: String,
    },

    /// The placement registry resolved (or re-resolved) the instance's
    /// host node.
    PlacementResolved {
        /// The node now hosting the instance.
        node: String,
        /// The incarnation counter after this resolution.
        incarnation: u64,
    },

    /// A migration was applied to the instance's persisted state during
    /// activation.
    MigrationApplied {
        /// The migration's opaque name token.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ActorIdentity;

    fn actor_ref() -> ActorRef {
        ActorRef::new("Counter", ActorIdentity::single("a"))
    }

    #[test]
    fn test_activated_is_info() {
        let event = InstanceEvent {
            timestamp: Utc::now(),
            actor_ref: actor_ref(),
            event_kind: InstanceEventKind::Activated,
            metadata: HashMap::new(),
        };
        assert_eq!(event.severity(), EventSeverity::Info);
        assert_eq!(InstanceEvent::EVENT_TYPE, "instance");
    }

    #[test]
    fn test_activation_failed_is_error() {
        let event = InstanceEvent {
            timestamp: Utc::now(),
            actor_ref: actor_ref(),
            event_kind: InstanceEventKind::ActivationFailed {
                error: "boom".to_string(),
            },
            metadata: HashMap::new(),
        };
        assert_eq!(event.severity(), EventSeverity::Error);
    }

    #[test]
    fn test_placement_resolved_serializes() {
        let event = InstanceEvent {
            timestamp: Utc::now(),
            actor_ref: actor_ref(),
            event_kind: InstanceEventKind::PlacementResolved {
                node: "n1".to_string(),
                incarnation: 1,
            },
            metadata: HashMap::new(),
        };
        let json = serde_json::to_string(&event.event_kind).unwrap();
        assert!(json.contains("PlacementResolved"));
        assert!(json.contains("n1"));
    }
}
