//! `Dispatcher`: the [`InboundHandler`] every node registers with the bus,
//! translating container outcomes into [`InvocationReply`] and retrying
//! transient failures locally before giving up.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::bus::InboundHandler;
use crate::container::{Container, ContainerError};
use crate::invocation::{FrameworkErrorKind, Invocation, InvocationReply};

/// Hands invocations to the local [`Container`], retrying transient
/// failures (a closing lock, a deactivating instance, a momentarily full
/// capacity) up to a fixed local budget before surfacing them to the
/// caller as `Unreachable`.
///
/// Deadlines are enforced at the edges: an invocation already past its
/// deadline is rejected before it ever reaches the container, and the
/// retry loop stops as soon as the deadline passes even if budget
/// remains.
pub struct Dispatcher {
    container: Arc<Container>,
    retries: u32,
}

impl Dispatcher {
    /// Builds a dispatcher retrying transient container errors up to
    /// `retries` times before giving up.
    pub fn new(container: Arc<Container>, retries: u32) -> Self {
        Self { container, retries }
    }

    fn map_error(err: ContainerError) -> InvocationReply {
        match err {
            ContainerError::Action(action_err) => {
                InvocationReply::ActionError(action_err.into_payload())
            }
            ContainerError::TypeNotRegistered(_)
            | ContainerError::ActionNotSupported(_)
            | ContainerError::InstanceNotFound(_) => {
                InvocationReply::FrameworkError(FrameworkErrorKind::NotSupported)
            }
            ContainerError::ActivationFailed { .. } => {
                InvocationReply::FrameworkError(FrameworkErrorKind::ActivationFailed)
            }
            ContainerError::DeactivationFailed { source, .. } => {
                InvocationReply::FrameworkError(FrameworkErrorKind::Internal(source.to_string()))
            }
            ContainerError::Deactivating(_) | ContainerError::LockClosed(_) => {
                InvocationReply::Unreachable
            }
            ContainerError::CapacityExceeded { current, max } => InvocationReply::FrameworkError(
                FrameworkErrorKind::Internal(format!("container at capacity {current}/{max}")),
            ),
        }
    }
}

#[async_trait]
impl InboundHandler for Dispatcher {
    async fn handle(&self, invocation: Invocation) -> InvocationReply {
        if invocation.is_expired() {
            return InvocationReply::FrameworkError(FrameworkErrorKind::Timeout);
        }

        let mut attempt = 0;
        loop {
            match self.container.dispatch(invocation.clone()).await {
                Ok(payload) => return InvocationReply::Ok(payload),
                Err(err) => {
                    let retriable = err.is_transient();
                    if retriable && attempt < self.retries && !invocation.is_expired() {
                        attempt += 1;
                        continue;
                    }
                    return Self::map_error(err);
                }
            }
        }
    }
}
