use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfinder::{AppState, config::ServerConfig, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfinder=debug,tower_http=info,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    let campus = config.load_campus()?;
    tracing::info!(
        "campus data: {} locations, {} path nodes",
        campus.locations.len(),
        campus.path_nodes.len()
    );

    let app = create_router(AppState::new(campus));

    let addrs = config.socket_addrs()?;
    let listener = tokio::net::TcpListener::bind(addrs.as_slice()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("starting wayfinder on http://{addr}");
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /api/locations");
    tracing::info!("  GET  /api/locations/:id");
    tracing::info!("  GET  /api/locations/search");
    tracing::info!("  POST /api/route");
    tracing::info!("  POST /api/route/locations");
    tracing::info!("  POST /api/nearby");
    tracing::info!("  POST /api/navigate");
    tracing::info!("  GET  /health");

    axum::serve(listener, app).await?;
    Ok(())
}
