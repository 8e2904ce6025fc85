//! `ActionProxy`: a typed handle callers use to invoke actions without
//! touching invocations, deadlines, or retries directly.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::invocation::{Invocation, InvocationReply};
use crate::monitoring::{InstanceEvent, InstanceEventKind};
use crate::proxy::backoff::ProxyBackoff;
use crate::proxy::error::ProxyError;
use crate::suite::ActorKind;
use crate::system::handle::RuntimeHandle;
use crate::util::ActorRef;

/// A handle bound to one actor instance. Each `call` sends a fresh
/// invocation, retrying `Unreachable`/retriable `FrameworkError` replies
/// with exponential backoff up to `RuntimeConfig::proxy_max_retries` times.
///
/// [`ActorKind::Multiplar`] instances never leave the local node, so `call`
/// addresses this node's own bus entry point directly. [`ActorKind::Singular`]
/// instances are cluster-wide singletons: `call` resolves the current host
/// through [`crate::placement::PlacementRegistry`] first and addresses
/// whichever node wins the claim, which may not be this one.
///
/// Retries are driven here rather than in the [`crate::dispatch::Dispatcher`]
/// because they may legitimately span a placement move (the claimed host
/// evicted the instance and a different node answers next time); the
/// dispatcher's own retry budget only covers failures local to one node.
pub struct ActionProxy {
    runtime: Arc<RuntimeHandle>,
    actor_ref: ActorRef,
    kind: ActorKind,
}

impl ActionProxy {
    /// Builds a proxy addressing `actor_ref` through `runtime`, routing
    /// `Singular` kinds through placement and `Multiplar` kinds locally.
    pub fn new(runtime: Arc<RuntimeHandle>, actor_ref: ActorRef, kind: ActorKind) -> Self {
        Self {
            runtime,
            actor_ref,
            kind,
        }
    }

    /// Invokes `action` with `args`, returning the success payload or the
    /// terminal [`ProxyError`] once retries are exhausted.
    pub async fn call(&self, action: &str, args: Vec<u8>) -> Result<Vec<u8>, ProxyError> {
        let config = self.runtime.config();
        let backoff = ProxyBackoff::new(config.proxy_base_delay, config.proxy_max_delay);
        let max_retries = config.proxy_max_retries;

        let mut attempt = 0u32;
        loop {
            let invocation = Invocation::with_timeout(
                self.actor_ref.actor_type(),
                self.actor_ref.identity().clone(),
                action,
                args.clone(),
                config.invocation_timeout,
            );

            let target = match self.kind {
                ActorKind::Multiplar => self.runtime.node_id().clone(),
                ActorKind::Singular => {
                    let node = self
                        .runtime
                        .placement()
                        .resolve(&self.actor_ref, self.runtime.node_id().clone())
                        .await
                        .map_err(ProxyError::Placement)?;
                    let incarnation = self.runtime.placement().incarnation(&self.actor_ref);
                    self.runtime
                        .monitor()
                        .record(InstanceEvent::new(
                            self.actor_ref.clone(),
                            InstanceEventKind::PlacementResolved {
                                node: node.to_string(),
                                incarnation,
                            },
                        ))
                        .await;
                    node
                }
            };

            let outcome = self.runtime.bus().send(&target, invocation).await;

            let should_retry = match outcome {
                Ok(InvocationReply::Ok(payload)) => return Ok(payload),
                Ok(InvocationReply::ActionError(payload)) => return Err(ProxyError::Action(payload)),
                Ok(reply) if reply.is_retriable() => true,
                Ok(InvocationReply::FrameworkError(kind)) => {
                    return Err(ProxyError::Framework(kind))
                }
                Ok(InvocationReply::Unreachable) => true,
                Err(bus_err) => bus_err.is_retriable(),
            };

            if should_retry && attempt < max_retries {
                tokio::time::sleep(backoff.delay_for(attempt)).await;
                attempt += 1;
                continue;
            }
            return Err(ProxyError::Unreachable);
        }
    }
}
