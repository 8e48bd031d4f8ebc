//! Inbound request types

use serde::{Deserialize, Serialize};

/// Request for semantic search over the chunk store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search query text
    pub query: String,

    /// Number of results to return (1-20, default: 5)
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    5
}

/// Request for RAG question answering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagRequest {
    /// Question to answer
    pub question: String,

    /// Number of context chunks to ground the answer on (1-10, default: 3)
    #[serde(default = "default_rag_limit")]
    pub limit: usize,
}

fn default_rag_limit() -> usize {
    3
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: default_search_limit(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl RagRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            limit: default_rag_limit(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
