//! Worker pool.
//!
//! Five OS threads, each looping: wait under the node lock until the queue
//! is non-empty, pop the minimum-score task, release the lock, run the
//! handler, then reacquire the lock to release resources and record
//! metrics. The lock is never held across handler execution.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::handlers;
use crate::node::Node;
use crate::types::{ResourceCosts, TaskStatus};

const WORKER_COUNT: usize = 5;
const WAIT_POLL: Duration = Duration::from_millis(200);

/// Spawns the fixed-size worker pool as detached OS threads.
///
/// Returns their join handles so the runtime can await a clean exit during
/// shutdown (see `crate::platform::runtime`).
pub fn spawn_pool(node: Arc<Node>, shutdown: CancellationToken) -> Vec<std::thread::JoinHandle<()>> {
    (0..WORKER_COUNT)
        .map(|id| {
            let node = node.clone();
            let shutdown = shutdown.clone();
            std::thread::Builder::new()
                .name(format!("fog-worker-{id}"))
                .spawn(move || worker_loop(node, shutdown, id))
                .expect("failed to spawn worker thread")
        })
        .collect()
}

fn worker_loop(node: Arc<Node>, shutdown: CancellationToken, worker_id: usize) {
    info!(worker_id, "worker started");
    loop {
        let task = match wait_for_task(&node, &shutdown) {
            Some(task) => task,
            None => break,
        };

        debug!(task_id = %task.id, task_type = ?task.task_type, worker_id, "dispatching task");
        mark_processing(&node, &task.id);

        let task_type = task.task_type.clone();
        let payload = task.payload.clone();
        let started = Utc::now();
        let result = catch_unwind(AssertUnwindSafe(|| handlers::run(&task_type, &payload)))
            .unwrap_or_else(|_| {
                warn!(task_id = %task.id, "handler panicked, containing failure");
                json!({ "operation": task_type.as_str(), "status": "error", "error": "handler panicked" })
            });
        let completed_at = Utc::now();
        let latency_ms = (completed_at - started).num_milliseconds().max(0) as f64;

        complete_task(&node, &task.id, result, completed_at, latency_ms);
    }
    info!(worker_id, "worker stopped");
}

fn wait_for_task(node: &Arc<Node>, shutdown: &CancellationToken) -> Option<crate::types::Task> {
    let mut state = node.state.lock();
    loop {
        if let Some(task) = state.queue.pop() {
            return Some(task);
        }
        if shutdown.is_cancelled() {
            return None;
        }
        node.not_empty.wait_for(&mut state, WAIT_POLL);
    }
}

fn mark_processing(node: &Arc<Node>, task_id: &str) {
    let mut state = node.state.lock();
    if let Some(stored) = state.store.get_mut(task_id) {
        stored.status = TaskStatus::Processing;
    }
}

fn complete_task(
    node: &Arc<Node>,
    task_id: &str,
    result: serde_json::Value,
    completed_at: chrono::DateTime<Utc>,
    latency_ms: f64,
) {
    let mut state = node.state.lock();
    if let Some(stored) = state.store.get_mut(task_id) {
        let costs = ResourceCosts {
            cpu_cost: stored.cpu_cost,
            ram_cost: stored.ram_cost,
            storage_cost: stored.storage_cost,
            energy_cost: stored.energy_cost,
        };
        stored.status = TaskStatus::Completed;
        stored.completed_at = Some(completed_at);
        stored.result = Some(result);
        state.ledger.release(&costs);
        state.metrics.record_completion(latency_ms);
        info!(task_id, "task completed");
    }
}
