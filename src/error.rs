//! Error taxonomy for the query service
//!
//! Each kind maps to a distinct HTTP status so callers can tell "bad input"
//! from "store down" from "retrieval failed" from "generation failed".

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Service error kinds
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request failed validation; detected before any outbound call
    #[error("validation error: {0}")]
    Validation(String),

    /// The chunk store connection was never established or is gone
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The nearest-neighbor lookup against the chunk store failed
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    /// The answer-synthesis call failed
    #[error("generation failed: {0}")]
    Generation(String),

    /// Missing or invalid startup configuration; fatal, never reaches handlers
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Stable machine-readable kind string for the error body
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Unavailable(_) => "service_unavailable",
            Self::Retrieval(_) => "retrieval_error",
            Self::Generation(_) => "generation_error",
            Self::Config(_) => "configuration_error",
        }
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Retrieval(_) | Self::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Config errors abort startup; a handler should never produce one
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
