//! Risk Dashboard API Server

mod config;
mod error;
mod handlers;
mod routes;
mod state;


use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,risk_dashboard_api=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::AppConfig::from_env()?;

    info!("Starting Risk Dashboard API Server");
    info!("Events database: {}", config.events_db_path.display());
    info!("Analytics database: {}", config.analytics_db_path.display());
    info!("Listening on {}:{}", config.host, config.port);

    let state = state::AppState::new(&config);
    let app = routes::create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
