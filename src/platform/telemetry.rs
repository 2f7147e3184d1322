use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::http;
use crate::platform::service::ServiceRegistration;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);
const TICK_INTERVAL: Duration = Duration::from_secs(5);

/// The HTTP surface, bound to the configured port. Graceful shutdown waits
/// up to `SHUTDOWN_GRACE` for in-flight requests once the token cancels.
pub fn http_service(port: u16) -> ServiceRegistration {
    ServiceRegistration::new(
        "http",
        Arc::new(move |ctx, token: CancellationToken| {
            tokio::spawn(async move {
                let app = http::router(ctx.node());
                let addr = SocketAddr::from(([0, 0, 0, 0], port));
                let listener = tokio::net::TcpListener::bind(addr).await?;
                info!(%addr, "http server started");

                let shutdown = token.clone();
                let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                    shutdown.cancelled().await;
                    info!("shutting down http server");
                });

                let grace_deadline = async {
                    token.cancelled().await;
                    tokio::time::sleep(SHUTDOWN_GRACE).await;
                };

                tokio::select! {
                    result = serve => result.map_err(anyhow::Error::from),
                    _ = grace_deadline => {
                        info!("http server shutdown grace window elapsed");
                        Ok(())
                    }
                }
            })
        }),
    )
}

/// Every five seconds, recomputes `node.load` from queue length and
/// touches `last_seen`. Stops observing new ticks once cancelled; does not
/// itself need the grace window since it holds no client connections.
pub fn ticker_service() -> ServiceRegistration {
    ServiceRegistration::new(
        "metrics-ticker",
        Arc::new(move |ctx, token: CancellationToken| {
            tokio::spawn(async move {
                let node = ctx.node();
                let mut interval = tokio::time::interval(TICK_INTERVAL);
                loop {
                    tokio::select! {
                        _ = interval.tick() => node.tick(),
                        _ = token.cancelled() => {
                            info!("metrics ticker stopping");
                            break;
                        }
                    }
                }
                Ok::<(), anyhow::Error>(())
            })
        }),
    )
}
