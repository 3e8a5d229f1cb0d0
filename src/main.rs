use movieflix::{create_router, services::HttpBackend, AppState, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movieflix=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let backend = HttpBackend::new(config.api_base_url.clone(), config.request_timeout())?;
    let state = AppState::from_http(backend);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        api_base_url = %config.api_base_url,
        "Front-end server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
