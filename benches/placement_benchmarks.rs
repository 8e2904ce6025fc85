//! Placement Registry Benchmarks
//!
//! Measures baseline performance of singular-instance placement resolution:
//! - Cold resolve (first claim against the bus)
//! - Warm resolve (claim already held, no incarnation bump)
//! - Resolve across 10 distinct actor refs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use vactor::bus::{InMemoryMessageBus, InboundHandler};
use vactor::invocation::{Invocation, InvocationReply};
use vactor::placement::PlacementRegistry;
use vactor::util::{ActorIdentity, ActorRef, NodeId};

struct EchoHandler;

#[async_trait]
impl InboundHandler for EchoHandler {
    async fn handle(&self, invocation: Invocation) -> InvocationReply {
        InvocationReply::Ok(invocation.args().to_vec())
    }
}

async fn registry_with_hosts() -> PlacementRegistry {
    let bus = Arc::new(InMemoryMessageBus::new());
    bus.register(NodeId::new("n1"), "Counter", Arc::new(EchoHandler))
        .await;
    bus.register(NodeId::new("n2"), "Counter", Arc::new(EchoHandler))
        .await;
    PlacementRegistry::new(bus)
}

/// Benchmark: cold resolve, first claim for a fresh actor ref
fn placement_cold_resolve(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("placement_cold_resolve", |b| {
        b.to_async(&rt).iter(|| async {
            let registry = registry_with_hosts().await;
            let actor_ref = ActorRef::new("Counter", ActorIdentity::single("a"));
            let host = registry
                .resolve(&actor_ref, NodeId::new("n1"))
                .await
                .unwrap();
            black_box(host);
        });
    });
}

/// Benchmark: warm resolve, claim already held by the same node
fn placement_warm_resolve(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("placement_warm_resolve", |b| {
        b.to_async(&rt).iter(|| async {
            let registry = registry_with_hosts().await;
            let actor_ref = ActorRef::new("Counter", ActorIdentity::single("a"));
            registry
                .resolve(&actor_ref, NodeId::new("n1"))
                .await
                .unwrap();
            for _ in 0..10 {
                let host = registry
                    .resolve(&actor_ref, NodeId::new("n1"))
                    .await
                    .unwrap();
                black_box(host);
            }
        });
    });
}

/// Benchmark: resolve 10 distinct actor refs against the same registry
fn placement_distinct_refs(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("placement_distinct_refs", |b| {
        b.to_async(&rt).iter(|| async {
            let registry = registry_with_hosts().await;
            for i in 0..10 {
                let actor_ref = ActorRef::new("Counter", ActorIdentity::single(format!("actor-{i}")));
                let host = registry
                    .resolve(&actor_ref, NodeId::new("n1"))
                    .await
                    .unwrap();
                black_box(host);
            }
        });
    });
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2))
        .without_plots()
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets =
        placement_cold_resolve,
        placement_warm_resolve,
        placement_distinct_refs
}

criterion_main!(benches);
