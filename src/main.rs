use ibge_phillips_dashboard::{app, bootstrap, config::AppConfig};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let app_config = AppConfig::load()?;

    // Set a global span with node_name for all subsequent logs
    let _span = tracing::info_span!("node", name = %app_config.node_name).entered();

    tracing::info!("Starting ibge-phillips-dashboard");
    tracing::info!(
        ?app_config.environment,
        port = app_config.port,
        rate_limited = app_config.rate_limit.is_some(),
        "Loaded configuration"
    );

    // Fetched once; the page is served unchanged for the life of the process
    let page = Arc::new(bootstrap::build_page(&app_config).await);
    let router = app(page, app_config.rate_limit.as_ref())?;

    let addr = app_config.socket_addr();
    tracing::info!(%addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
