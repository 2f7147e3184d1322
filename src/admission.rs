//! Admission controller.
//!
//! Applies defaults, freezes the smart score, and evaluates the overload,
//! resource, and energy gates in that fixed order. The first failing gate
//! halts evaluation — later gates never run once one has failed, so a
//! rejection reason always names the gate that actually tripped.

use chrono::Utc;

use crate::error::NodeError;
use crate::ids;
use crate::ledger::{defaults_for, Ledger};
use crate::queue::TaskQueue;
use crate::rejection::RejectionQueue;
use crate::scoring::compute_score;
use crate::store::TaskStore;
use crate::types::{RejectedTask, Task, TaskStatus};

const OVERLOAD_LOAD_THRESHOLD: f64 = 0.80;
const OVERLOAD_QUEUE_THRESHOLD: usize = 50;
const ENERGY_CRITICALITY_THRESHOLD: i64 = 4;
const ENERGY_LEVEL_THRESHOLD: f64 = 0.30;

/// Mutable borrows of exactly the node substate admission needs, all held
/// under the caller's single node-wide lock.
pub struct AdmissionContext<'a> {
    pub ledger: &'a mut Ledger,
    pub queue: &'a mut TaskQueue,
    pub store: &'a mut TaskStore,
    pub rejection: &'a mut RejectionQueue,
    pub current_load: f64,
}

/// Runs the full admission pipeline for a freshly-submitted task.
///
/// On success the task has been reserved, stored, and queued. On failure
/// the task has been recorded in the rejection queue and the error is
/// returned for the caller to surface over HTTP.
pub fn admit(ctx: AdmissionContext<'_>, mut task: Task) -> Result<Task, NodeError> {
    apply_defaults(&mut task);
    task.id = ids::next_task_id();

    let queue_length = ctx.queue.len();
    let load = ctx.current_load;

    task.smart_score = compute_score(&task);

    if let Err(err) = check_overload(load, queue_length) {
        reject(ctx.rejection, task.clone(), err.to_string(), load, queue_length);
        return Err(err);
    }

    let costs = task_costs(&task);
    if let Err(reason) = ctx.ledger.can_afford(&costs) {
        let err = NodeError::InsufficientResources { reason };
        reject(ctx.rejection, task.clone(), err.to_string(), load, queue_length);
        return Err(err);
    }

    if let Err(err) = check_energy(task.criticality, ctx.ledger.energy_level) {
        reject(ctx.rejection, task.clone(), err.to_string(), load, queue_length);
        return Err(err);
    }

    task.status = TaskStatus::Queued;
    task.submitted_at = Utc::now();
    ctx.ledger.reserve(&costs);
    ctx.store.insert(task.clone());
    ctx.queue.push(task.clone());
    Ok(task)
}

fn check_overload(load: f64, queue_length: usize) -> Result<(), NodeError> {
    if load > OVERLOAD_LOAD_THRESHOLD || queue_length > OVERLOAD_QUEUE_THRESHOLD {
        return Err(NodeError::Overload { load, queue_length });
    }
    Ok(())
}

fn check_energy(criticality: i64, energy_level: f64) -> Result<(), NodeError> {
    if criticality >= ENERGY_CRITICALITY_THRESHOLD && energy_level < ENERGY_LEVEL_THRESHOLD {
        return Err(NodeError::EnergyCritical { level: energy_level, criticality });
    }
    Ok(())
}

fn apply_defaults(task: &mut Task) {
    let defaults = defaults_for(&task.task_type);
    if task.cpu_cost == 0.0 {
        task.cpu_cost = defaults.cpu_cost;
    }
    if task.ram_cost == 0.0 {
        task.ram_cost = defaults.ram_cost;
    }
    if task.storage_cost == 0.0 {
        task.storage_cost = defaults.storage_cost;
    }
    if task.energy_cost == 0.0 {
        task.energy_cost = defaults.energy_cost;
    }
}

fn task_costs(task: &Task) -> crate::types::ResourceCosts {
    crate::types::ResourceCosts {
        cpu_cost: task.cpu_cost,
        ram_cost: task.ram_cost,
        storage_cost: task.storage_cost,
        energy_cost: task.energy_cost,
    }
}

fn reject(
    rejection: &mut RejectionQueue,
    mut task: Task,
    reason: String,
    load: f64,
    queue_size: usize,
) {
    task.status = TaskStatus::Rejected;
    rejection.push(RejectedTask {
        task,
        rejected_at: Utc::now(),
        rejection_reason: reason,
        node_load: load,
        queue_size,
    });
}

/// Re-admits a previously-rejected task, re-checking only the resource
/// gate. Overload and energy are intentionally not re-evaluated: retry is
/// an explicit salvage path, not a second pass through ordinary admission.
pub fn retry(ctx: AdmissionContext<'_>, mut task: Task) -> Result<Task, NodeError> {
    let costs = task_costs(&task);
    ctx.ledger
        .can_afford(&costs)
        .map_err(|reason| NodeError::InsufficientResources { reason })?;

    task.smart_score = compute_score(&task);
    task.status = TaskStatus::Queued;
    task.submitted_at = Utc::now();
    ctx.ledger.reserve(&costs);
    ctx.store.insert(task.clone());
    ctx.queue.push(task.clone());
    Ok(task)
}
