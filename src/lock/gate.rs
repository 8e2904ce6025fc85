//! Per-instance exclusive/shared/none action gate with strict FIFO fairness.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tokio::sync::oneshot;

// Layer 3: Internal module imports
// (none)

/// The access mode an action requests for the instance it runs against.
///
/// `None` bypasses the gate entirely — the dispatcher never calls
/// [`ActionLock::acquire`] for it — and is reserved for long-polling
/// endpoints (see [`crate::timer::PollController`]) that must not stall
/// siblings while they wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// No other holder, of either mode, may be in flight.
    Exclusive,
    /// Any number of shared holders may coexist, but never alongside an
    /// exclusive holder.
    Shared,
    /// The gate is bypassed; the caller manages its own concurrency.
    None,
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exclusive => write!(f, "exclusive"),
            Self::Shared => write!(f, "shared"),
            Self::None => write!(f, "none"),
        }
    }
}

struct Waiter {
    mode: LockMode,
    grant: oneshot::Sender<()>,
}

struct State {
    exclusive_active: bool,
    shared_active: u32,
    queue: VecDeque<Waiter>,
    /// Set once the instance enters `Deactivating`; rejects further
    /// acquisitions so draining can complete.
    closed: bool,
}

/// An instance's exclusive/shared gate.
///
/// A single waiter queue, served strictly in FIFO order: a queued exclusive
/// request blocks all shared requests behind it, so a steady stream of
/// shared acquisitions can never starve an exclusive waiter.
pub struct ActionLock {
    state: Mutex<State>,
}

/// Error returned when the gate has been closed for deactivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("instance is deactivating; lock is closed")]
pub struct LockClosed;

impl ActionLock {
    /// Builds an open gate with no holders.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                exclusive_active: false,
                shared_active: 0,
                queue: VecDeque::new(),
                closed: false,
            }),
        }
    }

    /// Acquires the gate in `mode`, waiting in FIFO order if necessary.
    /// `mode` must be `Exclusive` or `Shared`; callers map `None` to
    /// skipping the gate before reaching this method.
    pub async fn acquire(self: &Arc<Self>, mode: LockMode) -> Result<LockGuard, LockClosed> {
        debug_assert!(mode != LockMode::None, "None bypasses the gate");

        let rx = {
            let mut state = self.state.lock();
            if state.closed {
                return Err(LockClosed);
            }
            if state.queue.is_empty() && Self::can_grant(&state, mode) {
                Self::apply_grant(&mut state, mode);
                None
            } else {
                let (tx, rx) = oneshot::channel();
                state.queue.push_back(Waiter { mode, grant: tx });
                Some(rx)
            }
        };

        if let Some(rx) = rx {
            // The releasing holder sends before popping, so a closed gate
            // still honors grants already promised to queued waiters.
            let _ = rx.await;
        }

        Ok(LockGuard {
            lock: Arc::clone(self),
            mode,
        })
    }

    /// Closes the gate: no further `acquire` calls succeed. Already-queued
    /// waiters are still served as holders release, so deactivation can
    /// wait on quiescence instead of on this call.
    pub fn close(&self) {
        self.state.lock().closed = true;
    }

    /// Whether any holder is currently active.
    pub fn is_idle(&self) -> bool {
        let state = self.state.lock();
        !state.exclusive_active && state.shared_active == 0
    }

    fn can_grant(state: &State, mode: LockMode) -> bool {
        match mode {
            LockMode::Exclusive => !state.exclusive_active && state.shared_active == 0,
            LockMode::Shared => !state.exclusive_active,
            LockMode::None => true,
        }
    }

    fn apply_grant(state: &mut State, mode: LockMode) {
        match mode {
            LockMode::Exclusive => state.exclusive_active = true,
            LockMode::Shared => state.shared_active += 1,
            LockMode::None => {}
        }
    }

    fn release(&self, mode: LockMode) {
        let mut state = self.state.lock();
        match mode {
            LockMode::Exclusive => state.exclusive_active = false,
            LockMode::Shared => state.shared_active = state.shared_active.saturating_sub(1),
            LockMode::None => {}
        }

        while let Some(front) = state.queue.front() {
            if !Self::can_grant(&state, front.mode) {
                break;
            }
            let waiter = state.queue.pop_front().expect("front just checked");
            let granted_mode = waiter.mode;
            Self::apply_grant(&mut state, granted_mode);
            let _ = waiter.grant.send(());
            if granted_mode == LockMode::Exclusive {
                break;
            }
        }
    }
}

impl Default for ActionLock {
    fn default() -> Self {
        Self::new()
    }
}

/// An active hold on an [`ActionLock`]; releases on drop.
pub struct LockGuard {
    lock: Arc<ActionLock>,
    mode: LockMode,
}

impl LockGuard {
    /// The mode this guard was acquired with.
    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.lock.release(self.mode);
    }
}
