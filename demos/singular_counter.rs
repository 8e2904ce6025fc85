//! Singular Counter Demo
//!
//! Demonstrates cluster-wide singular placement: two nodes share one bus
//! and one persistence store, register the same `Counter` actor type as
//! `Singular`, and both end up talking to the exact same instance no
//! matter which node's proxy issues the call.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │         InMemoryMessageBus              │
//! │        InMemoryPersistenceStore         │
//! └────────────────────────────────────────┘
//!              ↑                  ↑
//!    ┌─────────┴──────┐  ┌────────┴────────┐
//!    │   Node "n1"    │  │    Node "n2"    │
//!    │ Counter (host) │  │ Counter (proxy) │
//!    └────────────────┘  └─────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use vactor::persistence::StorePolicy;
use vactor::prelude::*;

struct Counter {
    value: i64,
}

#[async_trait]
impl ActorBehavior for Counter {
    async fn activate(&mut self, ctx: &mut ActorContext) -> Result<(), ActionError> {
        let mut cell = ctx.persistent_cell::<i64>("value");
        cell.load().await.map_err(ActionError::from_display)?;
        self.value = cell.value().copied().unwrap_or(0);
        Ok(())
    }

    async fn deactivate(&mut self, ctx: &mut ActorContext) -> Result<(), ActionError> {
        let mut cell = ctx.persistent_cell::<i64>("value");
        cell.load().await.map_err(ActionError::from_display)?;
        cell.change(self.value);
        cell.store(StorePolicy::Always)
            .await
            .map_err(ActionError::from_display)
    }

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

fn counter_registration() -> ActorTypeRegistration {
    ActorTypeRegistration::new("Counter", ActorKind::Singular, || {
        Box::new(Counter { value: 0 })
    })
}

fn node(bus: &Arc<InMemoryMessageBus>, store: &Arc<InMemoryPersistenceStore>, id: &str) -> Node {
    let placement = Arc::new(PlacementRegistry::new(Arc::clone(bus)));
    let runtime = Arc::new(RuntimeHandle::new(
        NodeId::new(id),
        Arc::clone(bus),
        placement,
        Arc::clone(store),
        RuntimeConfig::default(),
    ));
    Node::new(runtime)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("=== Singular Counter Demo ===\n");

    let bus = Arc::new(InMemoryMessageBus::new());
    let store = Arc::new(InMemoryPersistenceStore::new());

    println!("Step 1: Starting two nodes sharing one bus and one store");
    let n1 = node(&bus, &store, "n1");
    let n2 = node(&bus, &store, "n2");
    n1.register_type(counter_registration()).await?;
    n2.register_type(counter_registration()).await?;
    println!("  n1, n2 both declare themselves hosts for Counter\n");

    let target = ActorRef::new("Counter", ActorIdentity::single("shared"));

    println!("Step 2: Incrementing through n1's proxy");
    let v1 = n1.proxy(target.clone()).call("increment", vec![]).await?;
    println!("  -> {}", i64::from_be_bytes(v1.try_into().unwrap()));

    println!("Step 3: Incrementing through n2's proxy — same instance");
    let v2 = n2.proxy(target.clone()).call("increment", vec![]).await?;
    println!("  -> {}", i64::from_be_bytes(v2.try_into().unwrap()));

    println!("\nStep 4: Residency check");
    println!(
        "  n1 resident count = {}, n2 resident count = {}",
        n1.container().resident_count("Counter"),
        n2.container().resident_count("Counter")
    );
    println!(
        "  incarnation observed by n1 = {}",
        n1.runtime().placement().incarnation(&target)
    );

    n1.shutdown().await.ok();
    n2.shutdown().await.ok();
    println!("\nDone.");
    Ok(())
}
