//! Application state for the query server

use std::sync::Arc;

use crate::config::Config;
use crate::providers::ChunkStore;
use crate::retrieval::QueryService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    service: QueryService,
}

impl AppState {
    /// Build state over an established store connection
    pub fn new(config: Config, store: Arc<dyn ChunkStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                service: QueryService::new(store),
            }),
        }
    }

    /// Build state without a store connection; all query endpoints report
    /// unavailable while health and metadata keep working
    pub fn detached(config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                service: QueryService::detached(),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn service(&self) -> &QueryService {
        &self.inner.service
    }
}
