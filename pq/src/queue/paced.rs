//! PacedQueue implementation

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::QueueConfig;
use super::driver::Driver;
use super::error::QueueError;
use super::task::{Outcome, Task, TaskHandle};

/// A single-concurrency queue that spaces task starts by a minimum interval
///
/// Tasks run one at a time in submission order. Each task is run alongside a
/// timer for `interval`, and the next task starts only once both have
/// settled, so the gap between consecutive starts is
/// `max(operation duration, interval)`.
///
/// All queue state is owned by one spawned worker task; `submit` only hands
/// tasks to it over a channel.
pub struct PacedQueue {
    tx: mpsc::UnboundedSender<Task>,
    worker: JoinHandle<()>,
    interval: Duration,
}

impl PacedQueue {
    /// Create a queue with the given minimum interval
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, since the worker is spawned
    /// onto the current runtime.
    pub fn new(interval: Duration) -> Self {
        debug!(?interval, "PacedQueue::new: called");
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(rx, interval));
        Self { tx, worker, interval }
    }

    /// Create a queue from configuration
    pub fn with_config(config: &QueueConfig) -> Self {
        Self::new(config.interval())
    }

    /// Get the configured minimum interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Submit an operation, returning a handle to its eventual outcome
    ///
    /// Never blocks. The operation is not invoked until its turn comes.
    pub fn submit<F, Fut, T, E>(&self, op: F) -> TaskHandle<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (task, handle) = Task::new(op);
        let id = task.id();
        debug!(%id, "PacedQueue::submit: called");
        if self.tx.send(task).is_err() {
            // The task is dropped with the error, which settles the handle as abandoned
            warn!(%id, "PacedQueue::submit: worker is gone, task abandoned");
        }
        handle
    }

    /// Stop accepting tasks and wait for everything already submitted to run
    pub async fn shutdown(self) -> Result<(), QueueError> {
        debug!("PacedQueue::shutdown: called");
        let Self { tx, worker, .. } = self;
        drop(tx);
        worker.await?;
        info!("PacedQueue shut down");
        Ok(())
    }
}

/// Worker loop: the queue's only driver
///
/// Runs until every sender is dropped and the backlog is drained.
async fn run_worker(mut rx: mpsc::UnboundedReceiver<Task>, interval: Duration) {
    debug!(?interval, "run_worker: started");
    let mut driver = Driver::new();

    loop {
        while let Ok(task) = rx.try_recv() {
            driver.enqueue(task);
        }

        if let Some(task) = driver.start_next() {
            let id = task.id();
            debug!(
                %id,
                waited = ?task.submitted_at().elapsed(),
                pending = driver.pending(),
                "run_worker: starting task"
            );

            let (outcome, ()) = tokio::join!(task.run(), tokio::time::sleep(interval));
            match outcome {
                Outcome::Succeeded => debug!(%id, "run_worker: task succeeded"),
                Outcome::Failed => debug!(%id, "run_worker: task failed"),
                Outcome::Panicked => warn!(%id, "run_worker: task panicked"),
            }

            driver.settle();
            tokio::task::yield_now().await;
            continue;
        }

        debug!(busy = driver.is_busy(), "run_worker: idle, waiting for submissions");
        match rx.recv().await {
            Some(task) => driver.enqueue(task),
            None => break,
        }
    }

    debug!("run_worker: all senders dropped and backlog drained, exiting");
}
