//! Queue error types

use thiserror::Error;

/// Outcome of a task that did not produce a value
///
/// `E` is the error type of the submitted operation. A failing operation is
/// reported as `Failed` carrying its own error untouched.
#[derive(Debug, Error)]
pub enum TaskError<E> {
    #[error("Task failed: {0}")]
    Failed(E),

    #[error("Task panicked: {0}")]
    Panicked(String),

    #[error("Queue worker stopped before the task settled")]
    Abandoned,
}

impl<E> TaskError<E> {
    /// Take the operation's own error, if that is what this is
    pub fn into_failure(self) -> Option<E> {
        match self {
            TaskError::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors from the queue itself
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue worker terminated abnormally: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
