use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::node::Node;
use crate::platform::config::NodeConfig;
use crate::platform::context::PlatformContext;
use crate::platform::service::ServiceRegistration;
use crate::platform::telemetry::{http_service, ticker_service};
use crate::workers;

pub struct Platform {
    config: NodeConfig,
    services: Vec<ServiceRegistration>,
}

impl Platform {
    pub fn new(config: NodeConfig) -> Self {
        let services = vec![http_service(config.port), ticker_service()];
        Self { config, services }
    }

    pub fn register_service(&mut self, service: ServiceRegistration) {
        self.services.push(service);
    }

    pub async fn start(self) -> Result<PlatformRuntime> {
        initialize_logging();

        let node = Node::new(self.config);
        let root_token = CancellationToken::new();
        let context = PlatformContext::new(node.clone(), root_token.child_token());
        let worker_handles = workers::spawn_pool(node.clone(), root_token.child_token());

        let mut tasks = Vec::new();
        for service in self.services {
            let handle = service.spawn(context.clone(), root_token.child_token());
            tasks.push((service.name().to_string(), handle));
        }

        info!(node_id = %node.config.node_id, "node boot completed");

        Ok(PlatformRuntime {
            context,
            cancel_token: root_token,
            tasks,
            worker_handles,
        })
    }
}

pub struct PlatformRuntime {
    context: PlatformContext,
    cancel_token: CancellationToken,
    tasks: Vec<(String, JoinHandle<Result<()>>)>,
    worker_handles: Vec<std::thread::JoinHandle<()>>,
}

impl PlatformRuntime {
    pub fn context(&self) -> PlatformContext {
        self.context.clone()
    }

    pub async fn shutdown(self) -> Result<()> {
        self.cancel_token.cancel();
        self.context.node().wake_all();

        for (name, handle) in self.tasks {
            match handle.await {
                Ok(Ok(())) => info!(service = %name, "service shutdown cleanly"),
                Ok(Err(err)) => return Err(err),
                Err(err) => return Err(err.into()),
            }
        }

        for handle in self.worker_handles {
            if let Err(err) = tokio::task::spawn_blocking(move || handle.join()).await {
                warn!(%err, "worker join task failed");
            }
        }

        Ok(())
    }
}

fn initialize_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
