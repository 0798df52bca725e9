use anyhow::Context;
use fd_client::{BackendClient, ClientConfig};
use fd_edge::{EdgeConfig, EdgeState, tracing::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = EdgeConfig::from_env().context("Failed to read edge configuration")?;

    init_tracing(&config.environment);

    let backend_config = ClientConfig::from_env().context("Failed to read backend configuration")?;
    let backend = BackendClient::new(&backend_config)?;
    tracing::info!(backend = backend.base_url(), "backend client ready");

    let state = EdgeState::new(backend, &config);
    let app = fd_edge::router::app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, environment = ?config.environment, "edge function listening");

    axum::serve(listener, app).await?;

    Ok(())
}
