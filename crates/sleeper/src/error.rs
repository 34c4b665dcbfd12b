use crate::state::TaskState;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// `start` was called more than once
    #[error("SleeperTask-{name} has already been started")]
    AlreadyStarted { name: String },

    /// Wake-up or stop requested while the task is not running
    #[error("SleeperTask-{name} is not running (state: {state})")]
    NotRunning { name: String, state: TaskState },

    /// The worker loop did not exit in time. It has still been told to exit.
    #[error("SleeperTask-{name} took too long to stop (waited {timeout:?})")]
    StopTimeout { name: String, timeout: Duration },

    /// The worker loop ended without acknowledging stop, e.g. a worker panic
    #[error("SleeperTask-{name} worker loop exited without acknowledging stop")]
    LoopAborted { name: String },
}
