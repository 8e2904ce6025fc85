//! `PollController`: a many-waiters/one-broadcaster rendezvous primitive for
//! long-polling endpoints.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tokio::sync::oneshot;

// Layer 3: Internal module imports
// (none)

struct Inner<T> {
    latest: Option<T>,
    waiters: Vec<oneshot::Sender<T>>,
}

/// Rendezvous point for long-polling actions.
///
/// Many callers `wait()` concurrently; a single `interrupt(value)` delivers
/// `value` to every currently-waiting caller and latches it so any `wait()`
/// that arrives afterward returns immediately, until `reset()` clears the
/// latch. Intended to back actions locked in [`crate::lock::LockMode::None`]
/// so waiters never stall sibling actions on the same instance.
///
/// # Example
/// ```rust
/// use vactor::timer::PollController;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let controller: PollController<&'static str> = PollController::new();
/// controller.interrupt("B");
/// assert_eq!(controller.wait().await, "B");
/// # }
/// ```
pub struct PollController<T: Clone + Send + 'static> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone + Send + 'static> PollController<T> {
    /// Builds a controller with no latched value and no waiters.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                latest: None,
                waiters: Vec::new(),
            }),
        }
    }

    /// Waits for the next (or already-latched) value.
    pub async fn wait(&self) -> T {
        let rx = {
            let mut inner = self.inner.lock();
            if let Some(value) = &inner.latest {
                return value.clone();
            }
            let (tx, rx) = oneshot::channel();
            inner.waiters.push(tx);
            rx
        };
        rx.await.expect("PollController dropped while a waiter was pending")
    }

    /// Delivers `value` to every current waiter and latches it for future
    /// callers until `reset()`.
    pub fn interrupt(&self, value: T) {
        let mut inner = self.inner.lock();
        inner.latest = Some(value.clone());
        for tx in inner.waiters.drain(..) {
            let _ = tx.send(value.clone());
        }
    }

    /// Clears the latch so the next `wait()` blocks until the next
    /// `interrupt`.
    pub fn reset(&self) {
        self.inner.lock().latest = None;
    }

    /// Number of callers currently blocked in `wait()`.
    pub fn waiting_count(&self) -> usize {
        self.inner.lock().waiters.len()
    }
}

impl<T: Clone + Send + 'static> Default for PollController<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_latched_value_returns_immediately() {
        let controller: PollController<i32> = PollController::new();
        controller.interrupt(7);
        assert_eq!(controller.wait().await, 7);
        assert_eq!(controller.wait().await, 7);
    }

    #[tokio::test]
    async fn test_many_waiters_receive_broadcast() {
        let controller = Arc::new(PollController::<String>::new());
        let mut handles = Vec::new();
        for _ in 0..10 {
            let c = Arc::clone(&controller);
            handles.push(tokio::spawn(async move { c.wait().await }));
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(controller.waiting_count(), 10);
        controller.interrupt("B".to_string());

        for h in handles {
            assert_eq!(h.await.unwrap(), "B");
        }
    }

    #[tokio::test]
    async fn test_reset_unlatches() {
        let controller: PollController<i32> = PollController::new();
        controller.interrupt(1);
        controller.reset();

        let controller = Arc::new(controller);
        let c2 = Arc::clone(&controller);
        let waiter = tokio::spawn(async move { c2.wait().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        controller.interrupt(2);
        assert_eq!(waiter.await.unwrap(), 2);
    }
}
