use crate::{error::TaskError, state::TaskState, Worker};
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::sync::{oneshot, watch, Notify};
use tracing::{debug, error, info, warn};

/// How long `stop` waits for the worker loop to exit by default.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(15);

/// State shared between the task, its handles and the worker loop.
#[derive(Debug)]
struct Shared {
    name: String,
    state: Mutex<TaskState>,
    /// Single pending wake-up. `notify_one` stores at most one permit, which
    /// is what collapses bursts of wake-ups into one execution.
    wake: Notify,
    stop: Notify,
    /// Taken by the first successful `stop`.
    done_rx: Mutex<Option<oneshot::Receiver<()>>>,
    executions: watch::Sender<u64>,
    stop_timeout: Duration,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, TaskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn not_running(&self, state: TaskState) -> TaskError {
        TaskError::NotRunning {
            name: self.name.clone(),
            state,
        }
    }

    fn wake_up(&self) -> Result<(), TaskError> {
        let state = self.state();
        match *state {
            // Notified under the state lock: no wake-up is accepted after stop.
            TaskState::Running => {
                self.wake.notify_one();
                Ok(())
            }
            other => Err(self.not_running(other)),
        }
    }

    async fn stop(&self) -> Result<(), TaskError> {
        let done_rx = {
            let mut state = self.state();
            let current = *state;
            if !state.stop() {
                return Err(self.not_running(current));
            }
            self.stop.notify_one();
            self.done_rx
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
        };

        let Some(done_rx) = done_rx else {
            return Ok(());
        };

        match tokio::time::timeout(self.stop_timeout, done_rx).await {
            Ok(Ok(())) => {
                info!(task = %self.name, "Sleeper task stopped");
                Ok(())
            }
            Ok(Err(_)) => {
                warn!(task = %self.name, "Sleeper task loop exited without acknowledging stop");
                Err(TaskError::LoopAborted {
                    name: self.name.clone(),
                })
            }
            Err(_) => {
                warn!(
                    task = %self.name,
                    timeout = ?self.stop_timeout,
                    "Sleeper task did not stop in time"
                );
                Err(TaskError::StopTimeout {
                    name: self.name.clone(),
                    timeout: self.stop_timeout,
                })
            }
        }
    }
}

/// A background task that runs a [`Worker`] whenever it is woken up.
///
/// The worker is run at least once after every [`wake_up`](Self::wake_up)
/// made while the task is running. Wake-ups that arrive while the worker is
/// busy collapse into a single follow-up run, so the worker must be
/// idempotent. Waking up never blocks.
///
/// Dropping the task stops it: the loop exits after any in-flight run and
/// remaining handles see [`TaskState::Stopped`].
#[derive(Debug)]
pub struct SleeperTask<W> {
    worker: Arc<W>,
    shared: Arc<Shared>,
}

impl<W: Worker> SleeperTask<W> {
    pub fn new(worker: W) -> Self {
        Self::with_stop_timeout(worker, DEFAULT_STOP_TIMEOUT)
    }

    pub fn with_stop_timeout(worker: W, stop_timeout: Duration) -> Self {
        let (executions, _) = watch::channel(0);
        let shared = Shared {
            name: worker.name().to_string(),
            state: Mutex::new(TaskState::Created),
            wake: Notify::new(),
            stop: Notify::new(),
            done_rx: Mutex::new(None),
            executions,
            stop_timeout,
        };

        Self {
            worker: Arc::new(worker),
            shared: Arc::new(shared),
        }
    }

    /// Spawn the worker loop on the current tokio runtime.
    ///
    /// Only the first call starts the loop; every later call, including after
    /// `stop`, returns [`TaskError::AlreadyStarted`].
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime.
    pub fn start(&self) -> Result<(), TaskError> {
        let mut state = self.shared.state();
        if !state.start() {
            return Err(TaskError::AlreadyStarted {
                name: self.shared.name.clone(),
            });
        }

        let (done_tx, done_rx) = oneshot::channel();
        *self
            .shared
            .done_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(done_rx);

        tokio::spawn(worker_loop(
            Arc::clone(&self.worker),
            Arc::clone(&self.shared),
            done_tx,
        ));

        info!(task = %self.shared.name, "Sleeper task started");
        Ok(())
    }

    /// A cloneable handle for callers that only need to wake or stop the task.
    pub fn handle(&self) -> SleeperHandle {
        SleeperHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn state(&self) -> TaskState {
        *self.shared.state()
    }

    /// Request one more run of the worker.
    ///
    /// Returns [`TaskError::NotRunning`] before `start` or after `stop`.
    pub fn wake_up(&self) -> Result<(), TaskError> {
        self.shared.wake_up()
    }

    /// Like [`wake_up`](Self::wake_up), but silently does nothing unless the
    /// task is running.
    pub fn wake_up_if_started(&self) {
        let _ = self.shared.wake_up();
    }

    /// Stop the task and wait for the worker loop to exit.
    ///
    /// An in-flight run of the worker is not interrupted. If it does not
    /// finish within the stop timeout, [`TaskError::StopTimeout`] is returned
    /// and the loop exits on its own once the run completes. A worker that
    /// panics stops the task; if that happens while `stop` is waiting,
    /// [`TaskError::LoopAborted`] is returned.
    pub async fn stop(&self) -> Result<(), TaskError> {
        self.shared.stop().await
    }

    /// Number of completed worker runs.
    pub fn executions(&self) -> watch::Receiver<u64> {
        self.shared.executions.subscribe()
    }
}

impl<W> Drop for SleeperTask<W> {
    fn drop(&mut self) {
        let mut state = self.shared.state();
        if state.stop() {
            debug!(task = %self.shared.name, "Sleeper task dropped while running");
            self.shared.stop.notify_one();
        }
    }
}

/// Caller-side view of a [`SleeperTask`].
#[derive(Debug, Clone)]
pub struct SleeperHandle {
    shared: Arc<Shared>,
}

impl SleeperHandle {
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn state(&self) -> TaskState {
        *self.shared.state()
    }

    /// See [`SleeperTask::wake_up`].
    pub fn wake_up(&self) -> Result<(), TaskError> {
        self.shared.wake_up()
    }

    /// See [`SleeperTask::wake_up_if_started`].
    pub fn wake_up_if_started(&self) {
        let _ = self.shared.wake_up();
    }

    /// See [`SleeperTask::stop`].
    pub async fn stop(&self) -> Result<(), TaskError> {
        self.shared.stop().await
    }
}

/// Moves the task to `Stopped` when the worker loop ends, including by
/// unwinding out of a panicking worker. A panic leaves `done_tx` unsent.
struct LoopGuard {
    shared: Arc<Shared>,
    done_tx: Option<oneshot::Sender<()>>,
}

impl Drop for LoopGuard {
    fn drop(&mut self) {
        let _ = self.shared.state().stop();

        if std::thread::panicking() {
            error!(task = %self.shared.name, "Sleeper task worker panicked, task stopped");
            return;
        }
        if let Some(done_tx) = self.done_tx.take() {
            let _ = done_tx.send(());
        }
    }
}

async fn worker_loop<W: Worker>(worker: Arc<W>, shared: Arc<Shared>, done_tx: oneshot::Sender<()>) {
    let _guard = LoopGuard {
        shared: Arc::clone(&shared),
        done_tx: Some(done_tx),
    };

    loop {
        tokio::select! {
            biased;
            _ = shared.stop.notified() => break,
            _ = shared.wake.notified() => {}
        }

        debug!(task = %shared.name, "Running sleeper task worker");
        worker.work().await;
        shared.executions.send_modify(|count| *count += 1);
    }

    debug!(task = %shared.name, "Sleeper task loop exited");
}
