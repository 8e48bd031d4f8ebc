//! Route handlers for the query server

pub mod health;
pub mod query;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/search", post(query::search_documents))
        .route("/ask", post(query::ask_question))
}
