//! Query server binary
//!
//! Run with: cargo run --bin iso-rag-server

use iso_rag::{config::Config, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iso_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting up ISO Documents API...");

    // Missing required configuration is fatal before any serving begins.
    let config = Config::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Collection: {}", config.weaviate.collection);
    tracing::info!("  - Search timeout: {}s", config.weaviate.search_timeout_secs);
    tracing::info!("  - Generate timeout: {}s", config.weaviate.generate_timeout_secs);

    let server = RagServer::new(config).await?;

    tracing::info!("API: http://{}", server.address());
    tracing::info!("Endpoints: POST /search, POST /ask, GET /health, GET /");

    server.start().await?;

    Ok(())
}
