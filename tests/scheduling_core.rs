//! End-to-end scenarios against the node's public Rust API: admit, drain
//! through real workers, inspect the store and metrics. Sleeps are real
//! (the handlers genuinely sleep), kept short, matching the scenarios'
//! own millisecond budgets.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use fognode_core::error::NodeError;
use fognode_core::node::Node;
use fognode_core::platform::config::NodeConfig;
use fognode_core::types::{Task, TaskStatus, TaskType};
use fognode_core::workers;
use tokio_util::sync::CancellationToken;

fn test_config() -> NodeConfig {
    NodeConfig {
        node_id: "test-node".into(),
        location: "test-site".into(),
        port: 0,
    }
}

fn bare_task(task_type: TaskType, priority: i64, criticality: i64) -> Task {
    Task {
        id: String::new(),
        task_type,
        payload: HashMap::new(),
        priority,
        criticality,
        cpu_cost: 0.0,
        ram_cost: 0.0,
        storage_cost: 0.0,
        energy_cost: 0.0,
        estimated_latency: Duration::ZERO,
        network_latency: fognode_core::types::default_network_latency(),
        smart_score: 0.0,
        status: TaskStatus::Queued,
        submitted_at: Utc::now(),
        completed_at: None,
        result: None,
    }
}

/// S1 — happy path: a preprocessing task gets the exact expected score and
/// completes with the handler's declared fields within its sleep budget.
#[tokio::test]
async fn s1_happy_path_preprocessing() {
    let node = Node::new(test_config());
    let _workers = workers::spawn_pool(node.clone(), CancellationToken::new());

    let task = bare_task(TaskType::Preprocessing, 1, 1);
    let admitted = node.submit_task(task).unwrap();
    assert_eq!(admitted.status, TaskStatus::Queued);
    assert!((admitted.smart_score - 42.1255).abs() < 1e-9);
    assert_eq!(admitted.cpu_cost, 0.10);
    assert_eq!(admitted.ram_cost, 0.10);
    assert_eq!(admitted.storage_cost, 25.0);
    assert_eq!(admitted.energy_cost, 0.05);

    tokio::time::sleep(Duration::from_millis(250)).await;

    let fetched = node.get_task(&admitted.id).unwrap();
    assert_eq!(fetched.status, TaskStatus::Completed);
    let result = fetched.result.unwrap();
    assert_eq!(result["filtered"], serde_json::json!(true));
    assert_eq!(result["normalized"], serde_json::json!(true));
}

/// S2 — priority ordering: a high-criticality analytics task freezes a
/// lower score than a batch of routine caching tasks, so it is positioned
/// to be popped first regardless of submission order.
#[tokio::test]
async fn s2_high_criticality_task_scores_lower() {
    let node = Node::new(test_config());

    let mut last_caching_score = f64::MIN;
    for _ in 0..5 {
        let admitted = node
            .submit_task(bare_task(TaskType::Caching, 3, 1))
            .unwrap();
        last_caching_score = admitted.smart_score;
    }

    let analytics = node
        .submit_task(bare_task(TaskType::EdgeAnalytics, 0, 5))
        .unwrap();

    assert!(
        analytics.smart_score < last_caching_score,
        "analytics score {} should be lower than caching score {}",
        analytics.smart_score,
        last_caching_score
    );
}

/// S3 — overload rejection: the 52nd concurrently-queued task is rejected
/// once the queue already holds 51, independent of resource costs.
#[tokio::test]
async fn s3_overload_rejection_at_queue_length_51() {
    let node = Node::new(test_config());

    for _ in 0..51 {
        let mut task = bare_task(TaskType::Caching, 0, 1);
        task.cpu_cost = 0.001;
        task.ram_cost = 0.001;
        task.storage_cost = 0.1;
        task.energy_cost = 0.001;
        node.submit_task(task).unwrap();
    }

    let overflow = bare_task(TaskType::Caching, 0, 1);
    let err = node.submit_task(overflow).unwrap_err();
    match &err {
        NodeError::Overload { queue_length, .. } => assert_eq!(*queue_length, 51),
        other => panic!("expected Overload, got {other:?}"),
    }
    assert!(err.to_string().contains("queue_size=51"));

    let (total, _) = node.list_rejected();
    assert_eq!(total, 1);
    assert_eq!(node.metrics_snapshot().tasks_rejected, 1);
}

/// S5 — energy-critical rejection: identical costs, but only the
/// high-criticality task is turned away once energy is low.
#[tokio::test]
async fn s5_energy_gate_only_blocks_high_criticality() {
    let node = Node::new(test_config());

    let mut drain_a = bare_task(TaskType::Caching, 0, 1);
    drain_a.energy_cost = 0.5;
    node.submit_task(drain_a).unwrap();

    let mut drain_b = bare_task(TaskType::Caching, 0, 1);
    drain_b.energy_cost = 0.3;
    node.submit_task(drain_b).unwrap();

    let critical = bare_task(TaskType::Caching, 0, 5);
    let err = node.submit_task(critical).unwrap_err();
    assert!(matches!(err, NodeError::EnergyCritical { .. }));

    let routine = bare_task(TaskType::Caching, 0, 3);
    let admitted = node.submit_task(routine).unwrap();
    assert_eq!(admitted.status, TaskStatus::Queued);
}

/// S6 — retry salvage: a task rejected for lack of CPU succeeds once the
/// workers have drained enough prior work to free it back up.
#[tokio::test]
async fn s6_retry_after_resources_free_up() {
    let node = Node::new(test_config());

    // Reserve 0.8 of the node's CPU with two queued (not yet running)
    // edge_analytics tasks, leaving 0.2 free.
    node.submit_task(bare_task(TaskType::EdgeAnalytics, 0, 1))
        .unwrap();
    node.submit_task(bare_task(TaskType::EdgeAnalytics, 0, 1))
        .unwrap();

    let starved = bare_task(TaskType::EdgeAnalytics, 0, 1);
    let err = node.submit_task(starved).unwrap_err();
    assert!(matches!(err, NodeError::InsufficientResources { .. }));

    let (total, rejected) = node.list_rejected();
    assert_eq!(total, 1);
    let rejected_id = rejected[0].task.id.clone();

    // Now drain the two queued tasks so their CPU is released.
    let _workers = workers::spawn_pool(node.clone(), CancellationToken::new());
    tokio::time::sleep(Duration::from_millis(400)).await;

    let retried = node.retry_rejected(&rejected_id).unwrap();
    assert_eq!(retried.status, TaskStatus::Queued);

    tokio::time::sleep(Duration::from_millis(400)).await;
    let fetched = node.get_task(&rejected_id).unwrap();
    assert_eq!(fetched.status, TaskStatus::Completed);

    assert_eq!(node.list_rejected().0, 0);
}
