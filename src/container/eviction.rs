//! Eviction policy evaluation: deciding which resident instances of an
//! actor type are eligible to be deactivated and removed.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::Duration as ChronoDuration;

// Layer 3: Internal module imports
use crate::container::instance::Instance;
use crate::suite::ActorTypeRegistration;

/// Why an instance is eligible for eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// The type's resident cap was exceeded; this instance was the
    /// least-recently-used idle candidate.
    Capacity,
    /// The instance has been alive longer than the type's `max_age`.
    MaxAge,
    /// The instance has been idle longer than the type's `max_idle`.
    MaxIdle,
    /// The instance asked for its own finalization via
    /// `ActorContext::trigger_finalization`.
    Explicit,
}

impl EvictionReason {
    /// A short, stable label suitable for monitoring event metadata.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Capacity => "capacity",
            Self::MaxAge => "max_age",
            Self::MaxIdle => "max_idle",
            Self::Explicit => "explicit",
        }
    }
}

/// Instances of `actor_type` that `max_age`/`max_idle` mark eligible for
/// eviction right now. Only idle instances (no in-flight or queued
/// actions) are returned — the container does not preempt live work.
pub fn due_for_passive_eviction(
    registration: &ActorTypeRegistration,
    instances: &[Arc<Instance>],
) -> Vec<(Arc<Instance>, EvictionReason)> {
    let mut due = Vec::new();
    for instance in instances {
        if !instance.is_idle() {
            continue;
        }
        if instance.wants_finalization() {
            due.push((Arc::clone(instance), EvictionReason::Explicit));
            continue;
        }
        if let Some(max_age) = registration.max_age() {
            if instance.age() >= to_chrono(max_age) {
                due.push((Arc::clone(instance), EvictionReason::MaxAge));
                continue;
            }
        }
        if let Some(max_idle) = registration.max_idle() {
            if instance.idle_for() >= to_chrono(max_idle) {
                due.push((Arc::clone(instance), EvictionReason::MaxIdle));
            }
        }
    }
    due
}

/// Selects the least-recently-used idle instance to evict to admit a new
/// one, given a configured `capacity`. Returns `None` if there is no idle
/// candidate (every resident instance has in-flight or queued work) or the
/// type has not reached capacity.
pub fn select_capacity_victim(
    capacity: usize,
    instances: &[Arc<Instance>],
) -> Option<(Arc<Instance>, EvictionReason)> {
    if instances.len() < capacity {
        return None;
    }
    instances
        .iter()
        .filter(|instance| instance.is_idle())
        .max_by_key(|instance| instance.idle_for())
        .map(|instance| (Arc::clone(instance), EvictionReason::Capacity))
}

fn to_chrono(duration: std::time::Duration) -> ChronoDuration {
    ChronoDuration::from_std(duration).unwrap_or(ChronoDuration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActionError, ActorBehavior, ActorContext};
    use crate::suite::ActorKind;
    use crate::util::ActorIdentity;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Noop;

    #[async_trait]
    impl ActorBehavior for Noop {
        async fn handle_action(
            &mut self,
            _action: &str,
            _args: &[u8],
            _ctx: &mut ActorContext,
        ) -> Result<Vec<u8>, ActionError> {
            Ok(vec![])
        }
    }

    fn instance() -> Arc<Instance> {
        Arc::new(Instance::new(
            crate::util::ActorRef::new("Counter", ActorIdentity::single("a")),
            Box::new(Noop),
        ))
    }

    #[test]
    fn test_capacity_victim_requires_reaching_capacity() {
        let instances = vec![instance(), instance()];
        assert!(select_capacity_victim(3, &instances).is_none());
    }

    #[test]
    fn test_capacity_victim_picks_idle_instance() {
        let instances = vec![instance(), instance()];
        let victim = select_capacity_victim(2, &instances);
        assert!(victim.is_some());
        assert_eq!(victim.unwrap().1, EvictionReason::Capacity);
    }

    #[test]
    fn test_explicit_finalization_takes_priority() {
        let inst = instance();
        inst.finalize_requested().store(true, std::sync::atomic::Ordering::SeqCst);
        let registration =
            ActorTypeRegistration::new("Counter", ActorKind::Multiplar, || Box::new(Noop));
        let due = due_for_passive_eviction(&registration, &[inst]);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1, EvictionReason::Explicit);
    }

    #[test]
    fn test_max_age_zero_marks_instance_due() {
        let inst = instance();
        let registration = ActorTypeRegistration::new("Counter", ActorKind::Multiplar, || {
            Box::new(Noop)
        })
        .with_max_age(Duration::from_secs(0));
        let due = due_for_passive_eviction(&registration, &[inst]);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1, EvictionReason::MaxAge);
    }

    #[test]
    fn test_label_is_stable_per_reason() {
        assert_eq!(EvictionReason::Capacity.label(), "capacity");
        assert_eq!(EvictionReason::MaxAge.label(), "max_age");
        assert_eq!(EvictionReason::MaxIdle.label(), "max_idle");
        assert_eq!(EvictionReason::Explicit.label(), "explicit");
    }
}
