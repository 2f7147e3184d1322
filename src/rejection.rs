//! Rejection queue.
//!
//! Appends every admission failure, and supports operator-driven retry.
//! Retry only re-checks the resource gate: a task that was turned away for
//! being overloaded or energy-critical may no longer be, and re-running the
//! full gate chain here would just duplicate `crate::admission`.

use crate::types::{RejectedTask, TaskId};

#[derive(Default)]
pub struct RejectionQueue {
    entries: Vec<RejectedTask>,
}

impl RejectionQueue {
    pub fn push(&mut self, rejected: RejectedTask) {
        self.entries.push(rejected);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn all(&self) -> &[RejectedTask] {
        &self.entries
    }

    /// Removes and returns the rejected task with the given id, if present.
    pub fn take(&mut self, id: &str) -> Option<RejectedTask> {
        let idx = self.entries.iter().position(|r| r.task.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.entries.iter().any(|r| &r.task.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
