use clap::Parser;
use orgdir_server::{AppState, ServerConfig, serve};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orgdir_server=info,orgdir=info,info".into()),
        )
        .init();

    let config = ServerConfig::parse();

    match &config.dataset {
        Some(path) => info!("Loading directory from {}", path.display()),
        None => info!("Starting with an in-memory directory"),
    }

    let state = AppState::open(config.clone())?;
    let stats = state.directory.stats()?;
    info!(
        "Directory ready: {} buildings, {} activities, {} organizations",
        stats.buildings, stats.activities, stats.organizations
    );

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    serve(listener, state, shutdown).await?;

    Ok(())
}
