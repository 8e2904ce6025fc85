//! The behavior contract every actor type implements.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::actor::context::ActorContext;

/// An error raised by an action body or a lifecycle hook.
///
/// Carries an opaque serialized payload so application code can use
/// whatever error representation (an enum, a JSON object, ...) it likes;
/// the runtime never inspects the payload, only forwards it to the caller
/// as `InvocationReply::ActionError`.
#[derive(Debug, Clone)]
pub struct ActionError {
    message: String,
    payload: Vec<u8>,
}

impl ActionError {
    /// Builds an error from a pre-serialized application payload.
    pub fn new(message: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            message: message.into(),
            payload,
        }
    }

    /// Builds an error from any `Display` value, serializing its message as
    /// the payload. Convenient for actors that do not need a structured
    /// error format on the wire.
    pub fn from_display(err: impl fmt::Display) -> Self {
        let message = err.to_string();
        Self {
            payload: message.clone().into_bytes(),
            message,
        }
    }

    /// Human-readable summary, for logging.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The serialized payload to return to the caller.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes the error, returning the payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ActionError {}

/// The behavior of one actor type: how an instance activates, serves
/// actions, and deactivates.
///
/// Implementations are registered once per actor type (see
/// [`crate::suite`]) and constructed fresh on every activation; there is no
/// shared state between instances except what flows through
/// [`ActorContext::persistent_cell`].
///
/// `activate` and `deactivate` default to no-ops: most actors only need to
/// `load()` their persistable state, which the default no-op leaves to the
/// action bodies themselves, but actors with expensive warm-up or explicit
/// two-phase persistence should override them.
///
/// # Example
/// ```rust
/// use async_trait::async_trait;
/// use vactor::actor::{ActionError, ActorBehavior, ActorContext};
///
/// struct Echo;
///
/// #[async_trait]
/// impl ActorBehavior for Echo {
///     async fn handle_action(
///         &mut self,
///         action: &str,
///         args: &[u8],
///         _ctx: &mut ActorContext,
///     ) -> Result<Vec<u8>, ActionError> {
///         match action {
///             "echo" => Ok(args.to_vec()),
///             other => Err(ActionError::from_display(format!("unknown action {other}"))),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait ActorBehavior: Send + 'static {
    /// Runs once, after the factory constructs the instance and before any
    /// action is dispatched. Typical use: `load()` persistable cells and
    /// apply migrations.
    async fn activate(&mut self, _ctx: &mut ActorContext) -> Result<(), ActionError> {
        Ok(())
    }

    /// Runs once, after in-flight actions drain and before the instance is
    /// removed from the container. Typical use: flush dirty persistable
    /// cells with `store()`.
    async fn deactivate(&mut self, _ctx: &mut ActorContext) -> Result<(), ActionError> {
        Ok(())
    }

    /// Handles one action call by name. Implementations dispatch on
    /// `action` themselves (a `match` is typical); unknown names should
    /// return an `ActionError`, not panic.
    async fn handle_action(
        &mut self,
        action: &str,
        args: &[u8],
        ctx: &mut ActorContext,
    ) -> Result<Vec<u8>, ActionError>;

    /// Handles a `Shared`- or `None`-locked action.
    ///
    /// Unlike `handle_action`, this takes `&self`: the container runs
    /// concurrent-mode actions against a shared reader lock so that many
    /// `Shared` holders (or any number of `None` callers, including ones
    /// already suspended in a long-poll wait) can be in flight on the same
    /// instance at once. Actors that declare any action under `Shared` or
    /// `None` must hold the state those actions touch behind their own
    /// interior-mutability type (an `Arc<Mutex<_>>` field, a
    /// [`crate::timer::PollController`], an atomic) and override this
    /// method; the default rejects every action, which is correct for
    /// actors that only ever run under the `Exclusive` default.
    async fn handle_concurrent_action(
        &self,
        action: &str,
        _args: &[u8],
        _ctx: &ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        Err(ActionError::from_display(format!(
            "actor does not support concurrent action {action}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ActorIdentity;

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

    #[test]
    fn test_action_error_from_display() {
        let err = ActionError::from_display("boom");
        assert_eq!(err.message(), "boom");
        assert_eq!(err.payload(), b"boom");
    }

    #[test]
    fn test_action_error_new() {
        let err = ActionError::new("custom", vec![1, 2, 3]);
        assert_eq!(err.message(), "custom");
        assert_eq!(err.into_payload(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_default_hooks_are_noop() {
        let mut behavior = Noop;
        let mut ctx = ActorContext::for_test("Noop", ActorIdentity::single("x"));
        assert!(behavior.activate(&mut ctx).await.is_ok());
        assert!(behavior.deactivate(&mut ctx).await.is_ok());
    }
}
