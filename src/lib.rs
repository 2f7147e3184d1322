//! Admission and scheduling core for an edge/fog compute node.
//!
//! Accepts small computational tasks over HTTP, admits them against
//! load/resource/energy gates, schedules the admitted ones by a frozen
//! priority score, and drains them through a fixed worker pool. A node
//! never coordinates with its peers — callers choose which node to submit
//! to, and each node owns its own in-memory state for the life of the
//! process.

pub mod admission;
pub mod error;
pub mod handlers;
pub mod http;
pub mod ids;
pub mod ledger;
pub mod metrics;
pub mod node;
pub mod platform;
pub mod queue;
pub mod rejection;
pub mod scoring;
pub mod store;
pub mod types;
pub mod workers;

pub use node::Node;
pub use platform::{NodeConfig, Platform, PlatformRuntime};
