//! Outbound response types

use serde::{Deserialize, Serialize};

use super::passage::ScoredPassage;

/// Answer returned when the generation provider produces no content
pub const NO_ANSWER_FALLBACK: &str = "No answer could be generated.";

/// Response from a RAG question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResponse {
    /// Generated answer, or the fallback sentinel when generation was empty
    pub answer: String,
    /// Passages used for grounding, in prompt order, most relevant first
    pub sources: Vec<ScoredPassage>,
    /// The input question, echoed verbatim
    pub question: String,
}

impl RagResponse {
    /// Build a response, substituting the fallback sentinel for empty answers
    pub fn new(question: String, answer: Option<String>, sources: Vec<ScoredPassage>) -> Self {
        let answer = match answer {
            Some(text) if !text.trim().is_empty() => text,
            _ => NO_ANSWER_FALLBACK.to_string(),
        };
        Self {
            answer,
            sources,
            question,
        }
    }
}

/// Overall health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` only when the store is ready and the collection is available
    pub status: HealthStatus,
    /// Whether the store connection reports ready
    pub weaviate_ready: bool,
    /// Whether the collection handle was acquired at startup
    pub collection_available: bool,
}

impl HealthResponse {
    pub fn new(weaviate_ready: bool, collection_available: bool) -> Self {
        let status = if weaviate_ready && collection_available {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };
        Self {
            status,
            weaviate_ready,
            collection_available,
        }
    }
}

/// Service metadata returned by the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: String,
    pub collection: String,
    pub endpoints: serde_json::Value,
}

impl ServiceInfo {
    pub fn new(collection: &str) -> Self {
        Self {
            name: "ISO Medical Device Documents API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
            collection: collection.to_string(),
            endpoints: serde_json::json!({
                "/search": "Semantic search in ISO documents",
                "/ask": "RAG-based question answering",
                "/health": "Health check",
            }),
        }
    }
}
