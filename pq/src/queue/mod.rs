//! Interval-paced, single-concurrency task queue
//!
//! Callers submit async operations and get back a [`TaskHandle`]. A single
//! worker runs the operations one at a time in submission order, holding each
//! start at least `interval` after the previous one.

mod config;
mod driver;
mod error;
mod paced;
mod task;

pub use config::QueueConfig;
pub use error::{QueueError, TaskError};
pub use paced::PacedQueue;
pub use task::{TaskHandle, TaskId};
