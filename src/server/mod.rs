//! HTTP server for the query service

pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::providers::{ChunkStore, WeaviateStore};
use state::AppState;

/// RAG query HTTP server
pub struct RagServer {
    config: Config,
    state: AppState,
}

impl RagServer {
    /// Connect to the chunk store and build the server
    pub async fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn ChunkStore> = Arc::new(WeaviateStore::connect(&config.weaviate).await?);
        Ok(Self::with_store(config, store))
    }

    /// Build the server over an already-established store handle
    pub fn with_store(config: Config, store: Arc<dyn ChunkStore>) -> Self {
        tracing::info!("Using chunk store provider: {}", store.name());
        let state = AppState::new(config.clone(), store);
        Self { config, state }
    }

    /// Build the router with all routes and middleware
    fn build_router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::routes()
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors)
    }

    /// Start serving; returns after graceful shutdown
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {e}")))?;

        let router = self.build_router();

        tracing::info!("Starting query server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {e}")))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Unavailable(format!("Server error: {e}")))?;

        // In-flight requests have drained; release the store connection.
        tracing::info!("Shutting down and closing store connection");
        self.state.service().close().await;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
