//! The priority queue of admitted tasks.
//!
//! Backed by `BinaryHeap`, which is a max-heap, so entries are ordered by
//! `Reverse(smart_score)`: the task with the *lowest* frozen score pops
//! first. Ties between equal scores break arbitrarily, by heap structure.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::types::Task;

struct QueuedTask(Task);

impl PartialEq for QueuedTask {
    fn eq(&self, other: &Self) -> bool {
        self.0.smart_score == other.0.smart_score
    }
}

impl Eq for QueuedTask {}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedTask {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap's max-heap pops the lowest score first.
        other
            .0
            .smart_score
            .partial_cmp(&self.0.smart_score)
            .unwrap_or(Ordering::Equal)
    }
}

#[derive(Default)]
pub struct TaskQueue {
    heap: BinaryHeap<QueuedTask>,
}

impl TaskQueue {
    pub fn push(&mut self, task: Task) {
        self.heap.push(QueuedTask(task));
    }

    pub fn pop(&mut self) -> Option<Task> {
        self.heap.pop().map(|q| q.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::types::{TaskStatus, TaskType};

    fn task(id: &str, score: f64) -> Task {
        Task {
            id: id.into(),
            task_type: TaskType::Caching,
            payload: Default::default(),
            priority: 0,
            criticality: 1,
            cpu_cost: 0.0,
            ram_cost: 0.0,
            storage_cost: 0.0,
            energy_cost: 0.0,
            estimated_latency: Duration::ZERO,
            network_latency: Duration::ZERO,
            smart_score: score,
            status: TaskStatus::Queued,
            submitted_at: Utc::now(),
            completed_at: None,
            result: None,
        }
    }

    #[test]
    fn pops_lowest_score_first() {
        let mut q = TaskQueue::default();
        q.push(task("high", 50.0));
        q.push(task("low", 5.0));
        q.push(task("mid", 20.0));

        assert_eq!(q.pop().unwrap().id, "low");
        assert_eq!(q.pop().unwrap().id, "mid");
        assert_eq!(q.pop().unwrap().id, "high");
        assert!(q.pop().is_none());
    }

    #[test]
    fn len_tracks_push_and_pop() {
        let mut q = TaskQueue::default();
        assert!(q.is_empty());
        q.push(task("a", 1.0));
        q.push(task("b", 2.0));
        assert_eq!(q.len(), 2);
        q.pop();
        assert_eq!(q.len(), 1);
    }
}
