//! End-to-end coverage of concurrent vs exclusive action dispatch: `Shared`
//! readers overlap each other, an `Exclusive` writer waits for them to
//! drain, and a `None`-locked long-poll rendezvous never blocks its own
//! release.

mod support;

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use vactor::prelude::*;

struct SharedCounter {
    value: AtomicI64,
}

#[async_trait]
impl ActorBehavior for SharedCounter {
    async fn handle_action(
        &mut self,
        action: &str,
        _args: &[u8],
        _ctx: &mut ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        match action {
            "write" => {
                let updated = self.value.fetch_add(100, Ordering::SeqCst) + 100;
                Ok(updated.to_be_bytes().to_vec())
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }

    async fn handle_concurrent_action(
        &self,
        action: &str,
        _args: &[u8],
        _ctx: &ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        match action {
            "read_slow" => {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(self.value.load(Ordering::SeqCst).to_be_bytes().to_vec())
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }
}

fn shared_counter_registration() -> ActorTypeRegistration {
    ActorTypeRegistration::new("SharedCounter", ActorKind::Multiplar, || {
        Box::new(SharedCounter {
            value: AtomicI64::new(0),
        })
    })
    .with_action_lock("write", LockMode::Exclusive)
    .with_action_lock("read_slow", LockMode::Shared)
}

#[tokio::test]
async fn shared_readers_overlap_instead_of_serializing() {
    let node = support::solo_node("n1");
    node.register_type(shared_counter_registration()).await.unwrap();
    let target = ActorRef::new("SharedCounter", ActorIdentity::single("a"));

    // Prime the instance so activation doesn't skew the timing below.
    node.proxy(target.clone()).call("write", vec![]).await.unwrap();

    let start = Instant::now();
    let mut handles = Vec::new();
    for _ in 0..5 {
        let proxy = node.proxy(target.clone());
        handles.push(tokio::spawn(async move { proxy.call("read_slow", vec![]).await }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }
    // Five 50ms shared reads that truly overlap finish close to 50ms total;
    // serialized they would take roughly 250ms.
    assert!(
        start.elapsed() < Duration::from_millis(150),
        "shared reads appear to have serialized: took {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn exclusive_write_waits_for_in_flight_shared_reads() {
    let node = support::solo_node("n1");
    node.register_type(shared_counter_registration()).await.unwrap();
    let target = ActorRef::new("SharedCounter", ActorIdentity::single("a"));
    node.proxy(target.clone()).call("write", vec![]).await.unwrap();

    let reader = node.proxy(target.clone());
    let read_handle = tokio::spawn(async move { reader.call("read_slow", vec![]).await });
    // Give the reader a head start so it is definitely holding its shared
    // guard before the writer is issued.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let start = Instant::now();
    node.proxy(target.clone()).call("write", vec![]).await.unwrap();
    // The writer can only have been granted the gate after the 50ms reader
    // released it, so it cannot complete much sooner than the reader did.
    assert!(
        start.elapsed() >= Duration::from_millis(30),
        "exclusive write returned before the in-flight shared read could have released: {:?}",
        start.elapsed()
    );

    read_handle.await.unwrap().unwrap();
}

struct PairCounter {
    value: i64,
    value_squared: i64,
}

#[async_trait]
impl ActorBehavior for PairCounter {
    async fn handle_action(
        &mut self,
        action: &str,
        args: &[u8],
        _ctx: &mut ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        match action {
            "set" => {
                let v = i64::from_be_bytes(args.try_into().map_err(ActionError::from_display)?);
                self.value = v;
                self.value_squared = v * v;
                Ok(vec![])
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }

    async fn handle_concurrent_action(
        &self,
        action: &str,
        _args: &[u8],
        _ctx: &ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        match action {
            "getn" => {
                // Read the two fields with a yield point between them so a
                // concurrent exclusive `set` has every chance to interleave
                // if the lock ever let it.
                let v = self.value;
                tokio::task::yield_now().await;
                let v_squared = self.value_squared;
                let mut payload = Vec::with_capacity(16);
                payload.extend_from_slice(&v.to_be_bytes());
                payload.extend_from_slice(&v_squared.to_be_bytes());
                Ok(payload)
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }
}

fn pair_counter_registration() -> ActorTypeRegistration {
    ActorTypeRegistration::new("PairCounter", ActorKind::Multiplar, || {
        Box::new(PairCounter {
            value: 0,
            value_squared: 0,
        })
    })
    .with_action_lock("set", LockMode::Exclusive)
    .with_action_lock("getn", LockMode::Shared)
}

fn decode_getn(reply: &[u8]) -> (i64, i64) {
    let v = i64::from_be_bytes(reply[0..8].try_into().unwrap());
    let v_squared = i64::from_be_bytes(reply[8..16].try_into().unwrap());
    (v, v_squared)
}

#[tokio::test]
async fn shared_reads_never_observe_a_torn_write_and_converge_after_exclusive_set() {
    let node = support::solo_node("n1");
    node.register_type(pair_counter_registration()).await.unwrap();
    let target = ActorRef::new("PairCounter", ActorIdentity::single("a"));
    node.proxy(target.clone()).call("set", 0i64.to_be_bytes().to_vec()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..100 {
        let proxy = node.proxy(target.clone());
        handles.push(tokio::spawn(async move { proxy.call("getn", vec![]).await }));
    }
    let setter = node.proxy(target.clone());
    handles.push(tokio::spawn(async move {
        setter.call("set", 5i64.to_be_bytes().to_vec()).await
    }));

    for handle in handles {
        let reply = handle.await.unwrap().unwrap();
        if !reply.is_empty() {
            let (v, v_squared) = decode_getn(&reply);
            assert_eq!(
                v_squared,
                v * v,
                "observed a torn read: value={v} value_squared={v_squared}"
            );
        }
    }

    let (final_v, final_v_squared) =
        decode_getn(&node.proxy(target).call("getn", vec![]).await.unwrap());
    assert_eq!((final_v, final_v_squared), (5, 25));
}

struct LongPoll {
    controller: PollController<String>,
}

#[async_trait]
impl ActorBehavior for LongPoll {
    async fn handle_action(
        &mut self,
        action: &str,
        _args: &[u8],
        _ctx: &mut ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        Err(ActionError::from_display(format!(
            "{action} runs only as a concurrent action"
        )))
    }

    async fn handle_concurrent_action(
        &self,
        action: &str,
        args: &[u8],
        _ctx: &ActorContext,
    ) -> Result<Vec<u8>, ActionError> {
        match action {
            "fetch" => Ok(self.controller.wait().await.into_bytes()),
            "teach" => {
                let message = String::from_utf8_lossy(args).to_string();
                self.controller.interrupt(message);
                Ok(vec![])
            }
            other => Err(ActionError::from_display(format!("unknown action {other}"))),
        }
    }
}

fn long_poll_registration() -> ActorTypeRegistration {
    ActorTypeRegistration::new("LongPoll", ActorKind::Multiplar, || {
        Box::new(LongPoll {
            controller: PollController::new(),
        })
    })
    .with_default_lock_mode(LockMode::None)
}

#[tokio::test]
async fn long_poll_fetch_unblocks_on_teach_without_deadlocking() {
    let node = support::solo_node("n1");
    node.register_type(long_poll_registration()).await.unwrap();
    let target = ActorRef::new("LongPoll", ActorIdentity::single("a"));

    let fetcher = node.proxy(target.clone());
    let fetch_handle = tokio::spawn(async move { fetcher.call("fetch", vec![]).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!fetch_handle.is_finished(), "fetch resolved before teach ever ran");

    let teacher = node.proxy(target.clone());
    let reply = tokio::time::timeout(
        Duration::from_millis(200),
        teacher.call("teach", b"hello".to_vec()),
    )
    .await
    .expect("teach must not be blocked behind the pending fetch")
    .unwrap();
    assert!(reply.is_empty());

    let fetched = tokio::time::timeout(Duration::from_millis(200), fetch_handle)
        .await
        .expect("fetch must unblock once teach interrupts the controller")
        .unwrap()
        .unwrap();
    assert_eq!(fetched, b"hello".to_vec());
}

#[tokio::test]
async fn long_poll_many_waiters_all_receive_the_same_broadcast() {
    let node = support::solo_node("n1");
    node.register_type(long_poll_registration()).await.unwrap();
    let target = ActorRef::new("LongPoll", ActorIdentity::single("a"));

    let mut fetchers = Vec::new();
    for _ in 0..8 {
        let proxy = node.proxy(target.clone());
        fetchers.push(tokio::spawn(async move { proxy.call("fetch", vec![]).await }));
    }
    tokio::time::sleep(Duration::from_millis(20)).await;

    node.proxy(target.clone())
        .call("teach", b"broadcast".to_vec())
        .await
        .unwrap();

    for handle in fetchers {
        let reply = tokio::time::timeout(Duration::from_millis(200), handle)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(reply, b"broadcast".to_vec());
    }
}
