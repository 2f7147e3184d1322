//! Type-specific task handlers.
//!
//! Handlers are pure functions of the payload: they never touch node state,
//! so they can run with the node lock released. Each simulates work with a
//! fixed sleep; a real deployment swaps these out without touching anything
//! upstream of `crate::workers`.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};

use crate::types::TaskType;

pub fn run(task_type: &TaskType, _payload: &HashMap<String, Value>) -> Value {
    match task_type {
        TaskType::DataAggregation => {
            thread::sleep(Duration::from_millis(100));
            json!({
                "operation": task_type.as_str(),
                "status": "success",
                "summary": "aggregated",
                "count": 42,
            })
        }
        TaskType::EdgeAnalytics => {
            thread::sleep(Duration::from_millis(200));
            json!({
                "operation": task_type.as_str(),
                "status": "success",
                "insights": "anomaly_detected",
                "confidence": 0.87,
            })
        }
        TaskType::Preprocessing => {
            thread::sleep(Duration::from_millis(50));
            json!({
                "operation": task_type.as_str(),
                "status": "success",
                "filtered": true,
                "normalized": true,
            })
        }
        TaskType::Caching => {
            thread::sleep(Duration::from_millis(30));
            json!({
                "operation": task_type.as_str(),
                "status": "success",
                "cached": true,
                "ttl": 3600,
            })
        }
        TaskType::Other => json!({
            "operation": task_type.as_str(),
            "status": "success",
            "error": "unknown task type",
        }),
    }
}
