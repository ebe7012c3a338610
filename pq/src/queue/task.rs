//! Task and completion handle types

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use super::error::TaskError;

/// Unique identifier for a submitted task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a task's operation settled, as seen by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Succeeded,
    Failed,
    Panicked,
}

type Job = Box<dyn FnOnce() -> BoxFuture<'static, Outcome> + Send>;

/// A deferred operation bundled with the sender for its outcome
pub(crate) struct Task {
    id: TaskId,
    submitted_at: Instant,
    job: Job,
}

impl Task {
    /// Wrap an operation, returning the task and the caller's handle
    ///
    /// The operation is not invoked until the task is run. Whatever it
    /// produces, including a panic, goes to the handle and the wrapped job
    /// itself always completes.
    pub(crate) fn new<F, Fut, T, E>(op: F) -> (Self, TaskHandle<T, E>)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let id = TaskId::new();
        let (tx, rx) = oneshot::channel();

        let job: Job = Box::new(move || {
            async move {
                let result = AssertUnwindSafe(async move { op().await }).catch_unwind().await;
                let (outcome, delivered) = match result {
                    Ok(Ok(value)) => (Outcome::Succeeded, Ok(value)),
                    Ok(Err(e)) => (Outcome::Failed, Err(TaskError::Failed(e))),
                    Err(payload) => (Outcome::Panicked, Err(TaskError::Panicked(panic_message(payload)))),
                };
                if tx.send(delivered).is_err() {
                    debug!(%id, "Task::run: handle dropped, outcome discarded");
                }
                outcome
            }
            .boxed()
        });

        let task = Self {
            id,
            submitted_at: Instant::now(),
            job,
        };
        (task, TaskHandle { id, rx })
    }

    pub(crate) fn id(&self) -> TaskId {
        self.id
    }

    pub(crate) fn submitted_at(&self) -> Instant {
        self.submitted_at
    }

    /// Invoke the operation and deliver its outcome
    pub(crate) async fn run(self) -> Outcome {
        (self.job)().await
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("id", &self.id).finish_non_exhaustive()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Caller-side handle to a submitted task's eventual outcome
///
/// Await it to receive the operation's value, or a [`TaskError`]. Dropping
/// the handle does not withdraw the task; it still runs in its turn.
#[must_use = "dropping a TaskHandle discards the task's outcome"]
pub struct TaskHandle<T, E> {
    id: TaskId,
    rx: oneshot::Receiver<Result<T, TaskError<E>>>,
}

impl<T, E> TaskHandle<T, E> {
    /// Get the id of the task this handle belongs to
    pub fn id(&self) -> TaskId {
        self.id
    }
}

impl<T, E> fmt::Debug for TaskHandle<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle").field("id", &self.id).finish_non_exhaustive()
    }
}

impl<T, E> Future for TaskHandle<T, E> {
    type Output = Result<T, TaskError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Sender dropped without a send means the task never ran
        Pin::new(&mut self.get_mut().rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(TaskError::Abandoned)))
    }
}
