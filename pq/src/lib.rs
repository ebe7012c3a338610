//! PacedQueue - single-concurrency, interval-paced task queue
//!
//! Work submitted to a [`PacedQueue`] runs strictly one item at a time, in
//! submission order, with at least a configured interval between the start of
//! one item and the start of the next.
//!
//! # Example
//!
//! ```ignore
//! use pacedqueue::PacedQueue;
//! use std::time::Duration;
//!
//! let queue = PacedQueue::new(Duration::from_millis(100));
//! let first = queue.submit(|| async { Ok::<_, String>(1) });
//! let second = queue.submit(|| async { Ok::<_, String>(2) });
//! assert_eq!(first.await?, 1);
//! assert_eq!(second.await?, 2); // ~100ms later
//! ```
//!
//! # Modules
//!
//! - [`queue`] - The paced queue primitive
//! - [`runner`] - Shell command runner built on the queue
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod queue;
pub mod runner;

pub use config::Config;
pub use queue::{PacedQueue, QueueConfig, QueueError, TaskError, TaskHandle, TaskId};
pub use runner::{CommandOutput, RunError};

/// Default minimum interval between task starts (1s)
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Default shell used to run commands
pub const DEFAULT_SHELL: &str = "sh";
