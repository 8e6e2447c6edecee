use std::future::Future;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::router;

pub async fn serve<F>(config: Config, listener: TcpListener, shutdown: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router::router(config.export_prometheus, config.max_body_size);

    match listener.local_addr() {
        Ok(addr) => tracing::info!("listening on {}", addr),
        Err(e) => tracing::warn!("listening on unknown address: {}", e),
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!("failed to serve type-api http server, {}", e);
    }
}
