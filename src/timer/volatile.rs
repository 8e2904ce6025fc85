//! Volatile per-instance timers, cancelled on deactivation.

// Layer 1: Standard library imports
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use tokio::task::JoinHandle;
use uuid::Uuid;

// Layer 3: Internal module imports
use crate::lock::{ActionLock, LockMode};

/// A handle to a scheduled timer. Dropping it does not cancel the timer —
/// use [`VolatileTimer::cancel`] or let the owning [`TimerService`] cancel
/// it on deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolatileTimer(Uuid);

impl VolatileTimer {
    /// Identifier useful for logging.
    pub fn id(&self) -> Uuid {
        self.0
    }
}

/// Schedules and cancels the volatile timers belonging to one instance.
///
/// Timers fire on the instance's [`ActionLock`] in exclusive mode by
/// default, so their callbacks observe the same serialization as ordinary
/// actions. Timers never survive a deactivation: [`TimerService::cancel_all`]
/// aborts every outstanding task, and rescheduling after that is a no-op
/// because the service itself is dropped with the instance.
pub struct TimerService {
    lock: Arc<ActionLock>,
    handles: DashMap<Uuid, JoinHandle<()>>,
}

impl TimerService {
    /// Binds a timer service to the instance's lock.
    pub fn new(lock: Arc<ActionLock>) -> Self {
        Self {
            lock,
            handles: DashMap::new(),
        }
    }

    /// Schedules `action` to run once, after `delay`, holding the instance's
    /// lock in exclusive mode. If the instance has already begun
    /// deactivating by the time the delay elapses, the callback never runs.
    pub fn schedule<F>(&self, delay: Duration, action: F) -> VolatileTimer
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let lock = Arc::clone(&self.lock);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Ok(guard) = lock.acquire(LockMode::Exclusive).await {
                action.await;
                drop(guard);
            }
        });
        self.handles.insert(id, handle);
        VolatileTimer(id)
    }

    /// Cancels one timer; a no-op if it already fired or was never
    /// scheduled through this service.
    pub fn cancel(&self, timer: VolatileTimer) {
        if let Some((_, handle)) = self.handles.remove(&timer.0) {
            handle.abort();
        }
    }

    /// Cancels every outstanding timer. Called by the container when an
    /// instance enters `Deactivating`.
    pub fn cancel_all(&self) {
        for entry in self.handles.iter() {
            entry.value().abort();
        }
        self.handles.clear();
    }

    /// Number of timers still outstanding.
    pub fn pending_count(&self) -> usize {
        self.handles.len()
    }
}
