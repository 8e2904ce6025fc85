//! Echo Multiplar Demo
//!
//! Demonstrates `Multiplar` placement: every identity gets its own resident
//! instance on the local node, a capacity cap recycles the least-recently-used
//! one, and persisted state survives that recycling even though in-memory
//! state does not.

use async_trait::async_trait;
use vactor::persistence::StorePolicy;
use vactor::prelude::*;

struct Echo {
    calls_this_activation: u64,
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
                self.calls_this_activation += 1;
                let mut cell = ctx.persistent_cell::<u64>("total_calls");
                cell.load().await.map_err(ActionError::from_display)?;
                let total = cell.value().copied().unwrap_or(0) + 1;
                cell.change(total);
                cell.store(StorePolicy::Always)
                    .await
                    .map_err(ActionError::from_display)?;

                let message = String::from_utf8_lossy(args);
                Ok(format!(
                    "{message} (activation calls={}, lifetime calls={total})",
                    self.calls_this_activation
                )
                .into_bytes())
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }
}

fn echo_registration() -> ActorTypeRegistration {
    ActorTypeRegistration::new("Echo", ActorKind::Multiplar, || {
        Box::new(Echo {
            calls_this_activation: 0,
        })
    })
    .with_capacity(3)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("=== Echo Multiplar Demo ===\n");

    let bus = std::sync::Arc::new(InMemoryMessageBus::new());
    let placement = std::sync::Arc::new(PlacementRegistry::new(bus.clone()));
    let store = std::sync::Arc::new(InMemoryPersistenceStore::new());
    let runtime = std::sync::Arc::new(RuntimeHandle::new(
        NodeId::new("n1"),
        bus,
        placement,
        store,
        RuntimeConfig::default(),
    ));
    let node = Node::new(runtime);
    node.register_type(echo_registration()).await?;
    println!("Step 1: registered Echo with capacity 3\n");

    println!("Step 2: greeting four identities in turn (capacity is 3)");
    for name in ["alice", "bob", "carol", "dave"] {
        let proxy = node.proxy(ActorRef::new("Echo", ActorIdentity::single(name)));
        let reply = proxy.call("echo", format!("hi {name}").into_bytes()).await?;
        println!("  {name}: {}", String::from_utf8_lossy(&reply));
        println!(
            "  resident instances after {name} = {}",
            node.container().resident_count("Echo")
        );
    }

    println!("\nStep 3: greeting \"alice\" again — her old instance was evicted,");
    println!("         so the activation counter resets but the persisted total doesn't");
    let reply = node
        .proxy(ActorRef::new("Echo", ActorIdentity::single("alice")))
        .call("echo", b"hi alice".to_vec())
        .await?;
    println!("  alice: {}", String::from_utf8_lossy(&reply));

    node.shutdown().await.ok();
    println!("\nDone.");
    Ok(())
}
