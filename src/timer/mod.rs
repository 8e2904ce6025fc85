//! Volatile timers and the long-poll rendezvous primitive.

pub mod poll;
pub mod volatile;

pub use poll::PollController;
pub use volatile::{TimerService, VolatileTimer};
