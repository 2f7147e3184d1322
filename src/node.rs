//! The node aggregate.
//!
//! Everything the scheduling core touches — ledger, queue, store, rejection
//! queue, metrics, derived load — lives behind one `parking_lot::Mutex`,
//! paired with one `parking_lot::Condvar` that wakes workers when the queue
//! gains an entry. This is the "single owned aggregate" the node singleton
//! is abstracted as: shared by reference within the process, never across
//! nodes.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Condvar, Mutex};
use tracing::{info, warn};

use crate::admission::{self, AdmissionContext};
use crate::error::NodeError;
use crate::ledger::Ledger;
use crate::metrics::Metrics;
use crate::platform::config::NodeConfig;
use crate::queue::TaskQueue;
use crate::rejection::RejectionQueue;
use crate::store::TaskStore;
use crate::types::{NodeInfo, RejectedTask, Task, TaskId};

pub struct NodeState {
    pub ledger: Ledger,
    pub queue: TaskQueue,
    pub store: TaskStore,
    pub rejection: RejectionQueue,
    pub metrics: Metrics,
    pub load: f64,
    pub last_seen: chrono::DateTime<Utc>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            ledger: Ledger::default(),
            queue: TaskQueue::default(),
            store: TaskStore::default(),
            rejection: RejectionQueue::default(),
            metrics: Metrics::default(),
            load: 0.0,
            last_seen: Utc::now(),
        }
    }
}

pub struct Node {
    pub config: NodeConfig,
    pub(crate) state: Mutex<NodeState>,
    pub(crate) not_empty: Condvar,
}

impl Node {
    pub fn new(config: NodeConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            state: Mutex::new(NodeState::default()),
            not_empty: Condvar::new(),
        })
    }

    /// Runs full admission for a freshly-submitted task and wakes one
    /// worker on success.
    pub fn submit_task(&self, task: Task) -> Result<Task, NodeError> {
        let mut state = self.state.lock();
        let load = state.load;
        let ctx = AdmissionContext {
            ledger: &mut state.ledger,
            queue: &mut state.queue,
            store: &mut state.store,
            rejection: &mut state.rejection,
            current_load: load,
        };
        match admission::admit(ctx, task) {
            Ok(admitted) => {
                info!(task_id = %admitted.id, task_type = ?admitted.task_type, score = admitted.smart_score, "task admitted");
                drop(state);
                self.not_empty.notify_one();
                Ok(admitted)
            }
            Err(err) => {
                warn!(error = %err, "task rejected at admission");
                state.metrics.record_rejection();
                Err(err)
            }
        }
    }

    pub fn get_task(&self, id: &str) -> Result<Task, NodeError> {
        self.state
            .lock()
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| NodeError::TaskNotFound(id.to_string()))
    }

    pub fn list_rejected(&self) -> (usize, Vec<RejectedTask>) {
        let state = self.state.lock();
        (state.rejection.len(), state.rejection.all().to_vec())
    }

    /// Re-admits a rejected task, re-checking only the resource gate.
    pub fn retry_rejected(&self, id: &TaskId) -> Result<Task, NodeError> {
        let mut state = self.state.lock();
        let rejected = state
            .rejection
            .take(id)
            .ok_or_else(|| NodeError::RejectedTaskNotFound(id.clone()))?;

        let ctx = AdmissionContext {
            ledger: &mut state.ledger,
            queue: &mut state.queue,
            store: &mut state.store,
            rejection: &mut state.rejection,
            current_load: state.load,
        };
        match admission::retry(ctx, rejected.task.clone()) {
            Ok(admitted) => {
                info!(task_id = %admitted.id, "rejected task retried successfully");
                drop(state);
                self.not_empty.notify_one();
                Ok(admitted)
            }
            Err(err) => {
                warn!(task_id = %id, error = %err, "retry still blocked, leaving in rejection queue");
                state.rejection.push(rejected);
                Err(NodeError::RetryBlocked { reason: err.to_string() })
            }
        }
    }

    pub fn clear_rejected(&self) -> usize {
        let mut state = self.state.lock();
        let count = state.rejection.len();
        state.rejection.clear();
        count
    }

    pub fn status(&self) -> NodeInfo {
        let state = self.state.lock();
        NodeInfo {
            id: self.config.node_id.clone(),
            location: self.config.location.clone(),
            status: "active",
            load: state.load,
            last_seen: state.last_seen,
        }
    }

    pub fn metrics_snapshot(&self) -> crate::types::MetricsSnapshot {
        let state = self.state.lock();
        state.metrics.snapshot(state.rejection.len())
    }

    /// Recomputes load from queue length and touches `last_seen`. Invoked
    /// by the background ticker every 5 seconds.
    pub fn tick(&self) {
        let mut state = self.state.lock();
        let load = state.queue.len() as f64 / 100.0;
        state.load = load;
        state.last_seen = Utc::now();
        state.metrics.set_load(load);
    }

    /// Wakes every worker so they can observe shutdown and exit promptly
    /// instead of waiting out the next poll interval.
    pub fn wake_all(&self) {
        self.not_empty.notify_all();
    }
}
