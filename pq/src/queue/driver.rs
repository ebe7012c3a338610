//! Admission state for the queue worker
//!
//! Holds the backlog and the busy flag. Only the worker task owns a
//! `Driver`, so none of this is shared or locked.

use std::collections::VecDeque;

use tracing::debug;

use super::task::Task;

pub(crate) struct Driver {
    /// Pending tasks in submission order
    backlog: VecDeque<Task>,

    /// True while one task and its pacing timer are in flight
    busy: bool,
}

impl Driver {
    pub(crate) fn new() -> Self {
        Self {
            backlog: VecDeque::new(),
            busy: false,
        }
    }

    /// Append a task to the end of the backlog
    pub(crate) fn enqueue(&mut self, task: Task) {
        debug!(id = %task.id(), pending = self.backlog.len() + 1, "Driver::enqueue: called");
        self.backlog.push_back(task);
    }

    /// Claim the head of the backlog if the queue is idle
    ///
    /// Returns None while busy or when nothing is pending; in both cases no
    /// state changes.
    pub(crate) fn start_next(&mut self) -> Option<Task> {
        if self.busy {
            debug!("Driver::start_next: busy, not starting");
            return None;
        }
        let task = self.backlog.pop_front()?;
        self.busy = true;
        debug!(id = %task.id(), remaining = self.backlog.len(), "Driver::start_next: claimed task");
        Some(task)
    }

    /// Mark the in-flight task and its timer as settled
    pub(crate) fn settle(&mut self) {
        debug!(remaining = self.backlog.len(), "Driver::settle: called");
        self.busy = false;
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn pending(&self) -> usize {
        self.backlog.len()
    }
}
