//! The smart-score function.
//!
//! Lower scores execute first. The score is computed once at admission time
//! and frozen onto the task; it is never recomputed against later ledger or
//! queue state, so a task's place in line cannot drift after it is admitted.

use crate::types::Task;

const CRITICALITY_WEIGHT: f64 = 10.0;
const LATENCY_WEIGHT: f64 = 0.1;
const NETWORK_LATENCY_WEIGHT: f64 = 0.05;
const RESOURCE_WEIGHT: f64 = 5.0;
const STORAGE_WEIGHT: f64 = 0.001;
const ENERGY_WEIGHT: f64 = 2.0;

/// Computes the smart score for a task given its declared costs.
///
/// Does not read or mutate `task.smart_score`; callers assign the result
/// themselves (see `crate::admission`) so the freezing point is explicit
/// at every call site.
pub fn compute_score(task: &Task) -> f64 {
    task.priority as f64
        + (5 - task.criticality) as f64 * CRITICALITY_WEIGHT
        + task.estimated_latency.as_secs_f64() * LATENCY_WEIGHT
        + task.network_latency.as_secs_f64() * NETWORK_LATENCY_WEIGHT
        + (task.cpu_cost + task.ram_cost) * RESOURCE_WEIGHT
        + task.storage_cost * STORAGE_WEIGHT
        + task.energy_cost * ENERGY_WEIGHT
}
