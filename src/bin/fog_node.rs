use fognode_core::{NodeConfig, Platform};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NodeConfig::from_env();
    let node_id = config.node_id.clone();

    let runtime = Platform::new(config).start().await?;

    tracing::info!(node_id = %node_id, "fog node running, press ctrl-c to shut down");
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");

    runtime.shutdown().await?;
    Ok(())
}
