//! Node-wide error taxonomy.
//!
//! Every fallible operation in the scheduling core returns [`NodeError`].
//! The HTTP status mapping lives in exactly one place: the `IntoResponse`
//! impl below.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::types::TaskId;

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("malformed task envelope: {0}")]
    BadRequest(String),

    #[error("node overloaded: load={load:.2}, queue_size={queue_length}")]
    Overload { load: f64, queue_length: usize },

    #[error("insufficient resources for task: {reason}")]
    InsufficientResources { reason: String },

    #[error("energy critical: level={level:.2} below threshold for criticality={criticality}")]
    EnergyCritical { level: f64, criticality: i64 },

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("rejected task not found: {0}")]
    RejectedTaskNotFound(TaskId),

    #[error("retry blocked: {reason}")]
    RetryBlocked { reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type NodeResult<T> = Result<T, NodeError>;

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = match &self {
            NodeError::BadRequest(_) => StatusCode::BAD_REQUEST,
            NodeError::Overload { .. } => StatusCode::SERVICE_UNAVAILABLE,
            NodeError::InsufficientResources { .. } => StatusCode::SERVICE_UNAVAILABLE,
            NodeError::EnergyCritical { .. } => StatusCode::SERVICE_UNAVAILABLE,
            NodeError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            NodeError::RejectedTaskNotFound(_) => StatusCode::NOT_FOUND,
            NodeError::RetryBlocked { .. } => StatusCode::SERVICE_UNAVAILABLE,
            NodeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overload_maps_to_503() {
        let err = NodeError::Overload { load: 0.9, queue_length: 60 };
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn overload_reason_reports_queue_size() {
        let err = NodeError::Overload { load: 0.81, queue_length: 51 };
        assert!(err.to_string().contains("queue_size=51"));
    }

    #[test]
    fn retry_blocked_maps_to_503() {
        let err = NodeError::RetryBlocked { reason: "cpu: need 0.40, have 0.20".into() };
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = NodeError::BadRequest("missing field `type`".into());
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn task_not_found_maps_to_404() {
        let err = NodeError::TaskNotFound("t-1".into());
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
