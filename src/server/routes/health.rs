//! Health and service metadata endpoints

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::response::{HealthResponse, ServiceInfo};

/// GET /health - health snapshot, always 200 with failures in the body
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.service().health().await)
}

/// GET / - service metadata
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo::new(&state.config().weaviate.collection))
}
