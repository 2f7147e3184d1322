//! Core data types for the fog node's admission and scheduling core.
//!
//! These types mirror the task envelope exchanged over HTTP (see `crate::http`)
//! but carry the scheduler's own bookkeeping fields (`smart_score`, `status`,
//! timestamps) that are never supplied by a client.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a task, assigned by the node at admission time.
///
/// Not a UUID: derivation is a monotonic nanosecond timestamp with a
/// per-node counter appended, so that ids sort in submission order even
/// on platforms with coarse clock resolution (see `crate::ids`).
pub type TaskId = String;

/// The four task kinds the node has a built-in handler for.
///
/// An unrecognized `type` string is still admissible (see `TaskType::Other`);
/// only at execution time does it surface as a result with an `error` field
/// rather than a rejection, per the node's data-driven dispatch policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    DataAggregation,
    EdgeAnalytics,
    Preprocessing,
    Caching,
    #[serde(other)]
    Other,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::DataAggregation => "data_aggregation",
            TaskType::EdgeAnalytics => "edge_analytics",
            TaskType::Preprocessing => "preprocessing",
            TaskType::Caching => "caching",
            TaskType::Other => "other",
        }
    }
}

/// Lifecycle status of a task.
///
/// State machine: `Queued -> Processing -> Completed`, or a direct terminal
/// `Rejected`. No other transitions are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Queued,
    Processing,
    Completed,
    Rejected,
}

/// Declared resource and timing costs of a task.
///
/// `cpu_cost`/`ram_cost` are fractions of node capacity in `[0, 1]`,
/// `storage_cost` is in MB, `energy_cost` is in Wh. A value of `0.0` in an
/// inbound envelope means "unspecified" and is replaced by the task-type
/// default (see `crate::ledger::defaults_for`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceCosts {
    pub cpu_cost: f64,
    pub ram_cost: f64,
    pub storage_cost: f64,
    pub energy_cost: f64,
}

/// A task as stored and scheduled by the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub payload: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_criticality")]
    pub criticality: i64,
    #[serde(default)]
    pub cpu_cost: f64,
    #[serde(default)]
    pub ram_cost: f64,
    #[serde(default)]
    pub storage_cost: f64,
    #[serde(default)]
    pub energy_cost: f64,
    #[serde(with = "duration_secs", default)]
    pub estimated_latency: Duration,
    #[serde(with = "duration_secs", default = "default_network_latency")]
    pub network_latency: Duration,
    pub smart_score: f64,
    pub status: TaskStatus,
    pub submitted_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<serde_json::Value>,
}

fn default_criticality() -> i64 {
    1
}

pub fn default_network_latency() -> Duration {
    Duration::from_millis(10)
}

/// Inbound wire shape for `POST /tasks`. Only `type` is strictly required;
/// everything else defaults the same way an omitted cost field does.
/// Bookkeeping fields (`id`, `smart_score`, `status`, `submitted_at`) are
/// never accepted from a client — admission assigns them.
#[derive(Debug, Deserialize)]
pub struct TaskSubmission {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub payload: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_criticality")]
    pub criticality: i64,
    #[serde(default)]
    pub cpu_cost: f64,
    #[serde(default)]
    pub ram_cost: f64,
    #[serde(default)]
    pub storage_cost: f64,
    #[serde(default)]
    pub energy_cost: f64,
    #[serde(with = "duration_secs", default)]
    pub estimated_latency: Duration,
    #[serde(with = "duration_secs", default = "default_network_latency")]
    pub network_latency: Duration,
}

impl TaskSubmission {
    /// Builds the internal `Task` record. Bookkeeping fields are
    /// placeholders overwritten by `crate::admission::admit`.
    pub fn into_task(self) -> Task {
        Task {
            id: String::new(),
            task_type: self.task_type,
            payload: self.payload,
            priority: self.priority,
            criticality: self.criticality,
            cpu_cost: self.cpu_cost,
            ram_cost: self.ram_cost,
            storage_cost: self.storage_cost,
            energy_cost: self.energy_cost,
            estimated_latency: self.estimated_latency,
            network_latency: self.network_latency,
            smart_score: 0.0,
            status: TaskStatus::Queued,
            submitted_at: Utc::now(),
            completed_at: None,
            result: None,
        }
    }
}

/// A task rejected at admission, retained for operator-initiated retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedTask {
    pub task: Task,
    pub rejected_at: DateTime<Utc>,
    pub rejection_reason: String,
    pub node_load: f64,
    pub queue_size: usize,
}

/// The node's externally-visible identity and derived load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: String,
    pub location: String,
    pub status: &'static str,
    pub load: f64,
    pub last_seen: DateTime<Utc>,
}

/// Snapshot of `/metrics`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub tasks_processed: u64,
    pub tasks_rejected: u64,
    pub rejected_queue_size: usize,
    pub avg_latency_ms: f64,
    pub current_load: f64,
}

/// Serializes a `Duration` as fractional seconds, matching the JSON numeric
/// latency fields clients send (`estimated_latency: 1.5` means 1.5s).
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        if secs.is_sign_negative() || !secs.is_finite() {
            return Ok(Duration::ZERO);
        }
        Ok(Duration::from_secs_f64(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_type_round_trips_through_json() {
        let v = serde_json::to_value(TaskType::EdgeAnalytics).unwrap();
        assert_eq!(v, serde_json::json!("edge_analytics"));

        let parsed: TaskType = serde_json::from_value(serde_json::json!("caching")).unwrap();
        assert_eq!(parsed, TaskType::Caching);
    }

    #[test]
    fn unknown_task_type_falls_back_to_other() {
        let parsed: TaskType = serde_json::from_value(serde_json::json!("quantum_flux")).unwrap();
        assert_eq!(parsed, TaskType::Other);
    }
}
