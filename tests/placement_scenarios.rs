//! End-to-end coverage of singular placement: a `Singular` actor instance is
//! reachable identically from either node sharing a cluster, but only ever
//! resident on the one that won the claim.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use vactor::prelude::*;

struct Counter {
    value: i64,
}

#[async_trait]
impl ActorBehavior for Counter {
    async fn handle_action(
        &mut self,
        action: &str,
        _args: &[u8],
        _ctx: &mut ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        match action {
            "increment" => {
                self.value += 1;
                Ok(self.value.to_be_bytes().to_vec())
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }
}

fn registration() -> ActorTypeRegistration {
    ActorTypeRegistration::new("Counter", ActorKind::Singular, || Box::new(Counter { value: 0 }))
}

#[tokio::test]
async fn singular_instance_is_reachable_from_either_node_but_resident_on_one() {
    let bus = Arc::new(InMemoryMessageBus::new());
    let store = Arc::new(InMemoryPersistenceStore::new());
    let node1 = support::shared_node(bus.clone(), store.clone(), "n1");
    let node2 = support::shared_node(bus, store, "n2");

    node1.register_type(registration()).await.unwrap();
    node2.register_type(registration()).await.unwrap();

    let target = ActorRef::new("Counter", ActorIdentity::single("k"));
    let proxy_via_n1 = node1.proxy(target.clone());
    let proxy_via_n2 = node2.proxy(target.clone());

    // Both proxies address the same cluster-wide instance regardless of
    // which node they were built from.
    let first = proxy_via_n1.call("increment", vec![]).await.unwrap();
    assert_eq!(first, 1i64.to_be_bytes().to_vec());
    let second = proxy_via_n2.call("increment", vec![]).await.unwrap();
    assert_eq!(second, 2i64.to_be_bytes().to_vec());
    let third = proxy_via_n1.call("increment", vec![]).await.unwrap();
    assert_eq!(third, 3i64.to_be_bytes().to_vec());

    // Exactly one node actually hosts the instance; the other never does.
    let n1_resident = node1.container().resident_count("Counter");
    let n2_resident = node2.container().resident_count("Counter");
    assert_eq!(n1_resident + n2_resident, 1);
}

#[tokio::test]
async fn releasing_a_claim_lets_placement_move_to_a_new_incarnation() {
    let bus = Arc::new(InMemoryMessageBus::new());
    let store = Arc::new(InMemoryPersistenceStore::new());
    let node1 = support::shared_node(bus.clone(), store.clone(), "n1");
    let node2 = support::shared_node(bus, store, "n2");

    node1.register_type(registration()).await.unwrap();
    node2.register_type(registration()).await.unwrap();

    let target = ActorRef::new("Counter", ActorIdentity::single("k"));
    node1
        .proxy(target.clone())
        .call("increment", vec![])
        .await
        .unwrap();
    assert_eq!(node1.runtime().placement().incarnation(&target), 1);

    node1.runtime().placement().release(&target).await;
    node2
        .proxy(target.clone())
        .call("increment", vec![])
        .await
        .unwrap();
    // node2's own placement cache never resolved this actor before, so its
    // first resolution also counts as a fresh incarnation.
    assert_eq!(node2.runtime().placement().incarnation(&target), 1);
}
