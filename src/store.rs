//! In-memory task store, keyed by id.
//!
//! Holds every task the node has admitted, across its whole lifecycle
//! (`Queued` through `Completed`). There is no eviction: the node is
//! expected to run as a single process for the lifetime of its host, per
//! the no-persistence, no-durability design.

use std::collections::HashMap;

use crate::types::{Task, TaskId};

#[derive(Default)]
pub struct TaskStore {
    tasks: HashMap<TaskId, Task>,
}

impl TaskStore {
    pub fn insert(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }
}
