//! End-to-end coverage of basic dispatch and capacity-driven recycling:
//! each identity gets its own instance, and an evicted-then-reborn instance
//! keeps its durable state while losing its in-memory one.

mod support;

use async_trait::async_trait;
use vactor::persistence::StorePolicy;
use vactor::prelude::*;

struct Echo {
    activations: i64,
}

#[async_trait]
impl ActorBehavior for Echo {
    async fn handle_action(
        &mut self,
        action: &str,
        args: &[u8],
        ctx: &mut ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        match action {
            "echo" => {
                self.activations += 1;
                let msg = String::from_utf8_lossy(args);
                let node = ctx.runtime().node_id().to_string();
                Ok(format!("{node}:{msg}:{}", self.activations).into_bytes())
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }
}

#[tokio::test]
async fn basic_dispatch_keeps_distinct_identities_independent() {
    let node = support::solo_node("n1");
    node.register_type(ActorTypeRegistration::new("Echo", ActorKind::Multiplar, || {
        Box::new(Echo { activations: 0 })
    }))
    .await
    .unwrap();

    let a = node.proxy(ActorRef::new("Echo", ActorIdentity::single("a")));
    let b = node.proxy(ActorRef::new("Echo", ActorIdentity::single("b")));

    assert_eq!(a.call("echo", b"hi".to_vec()).await.unwrap(), b"n1:hi:1".to_vec());
    assert_eq!(
        a.call("echo", b"again".to_vec()).await.unwrap(),
        b"n1:again:2".to_vec()
    );
    // "b" is a fresh instance: its own counter starts from zero, unaffected
    // by how many times "a" has already been invoked.
    assert_eq!(b.call("echo", b"hi".to_vec()).await.unwrap(), b"n1:hi:1".to_vec());

    assert_eq!(node.container().resident_count("Echo"), 2);
}

struct Recyclable {
    activations: i64,
}

#[async_trait]
impl ActorBehavior for Recyclable {
    async fn handle_action(
        &mut self,
        action: &str,
        _args: &[u8],
        ctx: &mut ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        match action {
            "hit" => {
                self.activations += 1;
                let mut cell = ctx.persistent_cell::<i64>("hits");
                cell.load().await.map_err(ActionError::from_display)?;
                let total = cell.value().copied().unwrap_or(0) + 1;
                cell.change(total);
                cell.store(StorePolicy::Always)
                    .await
                    .map_err(ActionError::from_display)?;

                let mut payload = Vec::with_capacity(16);
                payload.extend_from_slice(&self.activations.to_be_bytes());
                payload.extend_from_slice(&total.to_be_bytes());
                Ok(payload)
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }
}

fn split_hit_reply(reply: &[u8]) -> (i64, i64) {
    let activations = i64::from_be_bytes(reply[0..8].try_into().unwrap());
    let total = i64::from_be_bytes(reply[8..16].try_into().unwrap());
    (activations, total)
}

#[tokio::test]
async fn capacity_eviction_recycles_instances_but_preserves_persisted_state() {
    let node = support::solo_node("n1");
    node.register_type(
        ActorTypeRegistration::new("Recyclable", ActorKind::Multiplar, || {
            Box::new(Recyclable { activations: 0 })
        })
        .with_capacity(10),
    )
    .await
    .unwrap();

    const IDENTITIES: usize = 100;
    const ROUNDS: usize = 5;

    let mut zero_activations = Vec::with_capacity(ROUNDS);
    let mut zero_persisted = Vec::with_capacity(ROUNDS);

    for _round in 0..ROUNDS {
        for i in 0..IDENTITIES {
            let proxy = node.proxy(ActorRef::new("Recyclable", ActorIdentity::single(i.to_string())));
            let reply = proxy.call("hit", vec![]).await.unwrap();
            if i == 0 {
                let (activations, total) = split_hit_reply(&reply);
                zero_activations.push(activations);
                zero_persisted.push(total);
            }
            assert!(node.container().resident_count("Recyclable") <= 10);
        }
    }

    // The durable counter survives every eviction: five hits, five totals.
    assert_eq!(zero_persisted, vec![1, 2, 3, 4, 5]);
    // The in-memory counter does not: a capacity-driven eviction discards the
    // old `Recyclable` and the factory rebuilds a fresh one with
    // `activations: 0`, so at least one later hit on "0" sees `1` again
    // instead of a monotonically increasing count.
    assert!(
        zero_activations.iter().filter(|&&v| v == 1).count() >= 2,
        "expected at least one eviction-driven reset for identity \"0\", got {zero_activations:?}"
    );
}

#[tokio::test]
async fn without_instantiation_call_on_absent_instance_is_rejected() {
    let node = support::solo_node("n1");
    node.register_type(ActorTypeRegistration::new("Echo", ActorKind::Multiplar, || {
        Box::new(Echo { activations: 0 })
    }))
    .await
    .unwrap();

    let invocation =
        Invocation::new("Echo", ActorIdentity::single("ghost"), "echo", vec![]).without_instantiation();
    let reply = node.container().dispatch(invocation).await;
    assert!(reply.is_err());
}
