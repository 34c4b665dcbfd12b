//! Coalescing background work.
//!
//! A [`SleeperTask`] sleeps until it is woken up, then runs its [`Worker`].
//! Any number of callers may wake it; wake-ups that arrive while the worker is
//! running are merged into a single follow-up run.

pub mod error;
pub mod state;
pub mod task;

pub use error::TaskError;
pub use state::TaskState;
pub use task::{SleeperHandle, SleeperTask, DEFAULT_STOP_TIMEOUT};

use std::future::Future;

/// Some work to do repeatedly.
///
/// `work` may be run more often than strictly necessary, so it must be
/// idempotent.
pub trait Worker: Send + Sync + 'static {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Do the work once.
    fn work(&self) -> impl Future<Output = ()> + Send;
}

/// A [`Worker`] backed by a closure.
#[derive(Debug, Clone)]
pub struct FnWorker<F> {
    name: String,
    work: F,
}

/// Wrap a closure returning a future as a [`Worker`].
pub fn fn_worker<F, Fut>(name: impl Into<String>, work: F) -> FnWorker<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    FnWorker {
        name: name.into(),
        work,
    }
}

impl<F, Fut> Worker for FnWorker<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn work(&self) -> impl Future<Output = ()> + Send {
        (self.work)()
    }
}
