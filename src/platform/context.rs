use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::node::Node;

/// What a spawned service needs: the node aggregate and a handle on the
/// shutdown signal.
#[derive(Clone)]
pub struct PlatformContext {
    node: Arc<Node>,
    shutdown: CancellationToken,
}

impl PlatformContext {
    pub(crate) fn new(node: Arc<Node>, shutdown: CancellationToken) -> Self {
        Self { node, shutdown }
    }

    pub fn node(&self) -> Arc<Node> {
        Arc::clone(&self.node)
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}
