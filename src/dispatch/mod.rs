//! The dispatch pipeline: translating invocations into container outcomes
//! and container outcomes into replies.

pub mod dispatcher;

pub use dispatcher::Dispatcher;
