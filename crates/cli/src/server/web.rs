use pihole_collector_api::{create_api_routes, AppState};
use tracing::{error, info};

pub async fn start_web_server(bind_addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = create_api_routes(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    info!(
        bind_address = %listener.local_addr()?,
        metrics_url = format!("http://{}/metrics", bind_addr),
        "Metrics server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
