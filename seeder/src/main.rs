//! Risk Dashboard Seeder
//!
//! Creates the local SQLite databases the API server reads from.

use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use risk_dashboard_seeder::config::SeederConfig;
use risk_dashboard_seeder::{seed_analytics_database, seed_events_database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,risk_dashboard_seeder=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SeederConfig::from_env()?;

    info!("Initializing SQLite databases");

    seed_events_database(
        &config.events_db_path,
        config.synthetic_events,
        Utc::now().naive_utc(),
    )
    .await?;
    seed_analytics_database(&config.analytics_db_path).await?;

    info!("Databases initialized successfully");
    info!("- {}", config.events_db_path.display());
    info!("- {}", config.analytics_db_path.display());

    Ok(())
}
