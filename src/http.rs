//! HTTP surface.
//!
//! Thin binding from request to the operations on `crate::node::Node` —
//! this module does no scheduling itself. Status-code mapping lives solely
//! in `crate::error::NodeError`'s `IntoResponse` impl; handlers here never
//! construct a `StatusCode` directly except for the two success shapes
//! that aren't plain "echo the domain type" (the `POST` confirmations).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::NodeError;
use crate::node::Node;
use crate::types::TaskSubmission;

pub fn router(node: Arc<Node>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/metrics", get(metrics))
        .route("/tasks", post(submit_task))
        .route("/tasks/:id", get(get_task))
        .route("/rejected-tasks", get(list_rejected).delete(clear_rejected))
        .route("/rejected-tasks/:id/retry", post(retry_rejected))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(node)
}

async fn health(State(node): State<Arc<Node>>) -> impl IntoResponse {
    Json(json!({ "status": "healthy", "node": node.config.node_id }))
}

async fn status(State(node): State<Arc<Node>>) -> impl IntoResponse {
    Json(node.status())
}

async fn metrics(State(node): State<Arc<Node>>) -> impl IntoResponse {
    Json(node.metrics_snapshot())
}

async fn submit_task(
    State(node): State<Arc<Node>>,
    body: Result<Json<TaskSubmission>, axum::extract::rejection::JsonRejection>,
) -> Result<impl IntoResponse, NodeError> {
    let Json(submission) = body.map_err(|e| NodeError::BadRequest(e.to_string()))?;
    let task = node.submit_task(submission.into_task())?;
    Ok((StatusCode::OK, Json(task)))
}

async fn get_task(
    State(node): State<Arc<Node>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, NodeError> {
    let task = node.get_task(&id)?;
    Ok(Json(task))
}

async fn list_rejected(State(node): State<Arc<Node>>) -> impl IntoResponse {
    let (total, tasks) = node.list_rejected();
    Json(json!({ "total": total, "tasks": tasks }))
}

async fn retry_rejected(
    State(node): State<Arc<Node>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, NodeError> {
    let task = node.retry_rejected(&id)?;
    Ok(Json(json!({ "message": "task resubmitted", "task": task })))
}

async fn clear_rejected(State(node): State<Arc<Node>>) -> impl IntoResponse {
    let count = node.clear_rejected();
    Json(json!({ "message": "rejection queue cleared", "count": count }))
}
