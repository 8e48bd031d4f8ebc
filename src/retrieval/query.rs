//! The retrieval-augmented query service
//!
//! Validates requests, orchestrates the outbound store calls, and shapes the
//! responses. Holds no mutable state; every request is independent and runs
//! concurrently over the single long-lived store handle.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::providers::ChunkStore;
use crate::types::passage::ScoredPassage;
use crate::types::response::{HealthResponse, RagResponse};

/// Maximum result count for raw semantic search
pub const MAX_SEARCH_LIMIT: usize = 20;

/// Maximum context chunk count for RAG answering; tighter than search since
/// the generation prompt size is bounded
pub const MAX_RAG_LIMIT: usize = 10;

/// Query service over an injected chunk store handle
///
/// The handle is `None` when the connection was never established; every
/// operation then fails with `Unavailable` instead of crashing.
pub struct QueryService {
    store: Option<Arc<dyn ChunkStore>>,
}

impl QueryService {
    pub fn new(store: Arc<dyn ChunkStore>) -> Self {
        Self { store: Some(store) }
    }

    /// A service with no store connection; all operations report unavailable
    pub fn detached() -> Self {
        Self { store: None }
    }

    fn store(&self) -> Result<&Arc<dyn ChunkStore>> {
        self.store
            .as_ref()
            .ok_or_else(|| Error::Unavailable("Collection not available".to_string()))
    }

    /// Semantic search: top-`limit` passages for `query`, ascending distance
    ///
    /// Ordering is the store's own ranking; the service does not re-sort.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<ScoredPassage>> {
        validate_query(query, "query")?;
        validate_limit(limit, MAX_SEARCH_LIMIT)?;
        let store = self.store()?;

        tracing::info!("Searching for: {}", query);
        let passages = store.near_text(query, limit).await?;
        tracing::info!("Found {} results", passages.len());

        Ok(passages)
    }

    /// RAG question answering: one pipelined retrieval + generation call
    ///
    /// The returned sources mirror exactly the passages used for grounding,
    /// in prompt order. Retrieval succeeding with empty generated content is
    /// a degraded-but-valid outcome, answered with a fixed sentinel. The
    /// response echoes the question verbatim, untrimmed.
    pub async fn ask(&self, question: &str, limit: usize) -> Result<RagResponse> {
        validate_query(question, "question")?;
        validate_limit(limit, MAX_RAG_LIMIT)?;
        let store = self.store()?;

        tracing::info!("Question: {}", question);
        let task = PromptBuilder::grounded_answer_task(question);
        let generation = store.generate_from_text(question, limit, &task).await?;
        tracing::info!("Generated answer with {} sources", generation.passages.len());

        Ok(RagResponse::new(
            question.to_string(),
            generation.answer,
            generation.passages,
        ))
    }

    /// Health snapshot; never fails, unknown states report as degraded
    pub async fn health(&self) -> HealthResponse {
        match &self.store {
            Some(store) => {
                HealthResponse::new(store.is_ready().await, store.collection_available())
            }
            None => HealthResponse::new(false, false),
        }
    }

    /// Release the store connection at shutdown
    pub async fn close(&self) {
        if let Some(store) = &self.store {
            store.close().await;
        }
    }
}

fn validate_query(query: &str, field: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_limit(limit: usize, max: usize) -> Result<()> {
    if limit == 0 || limit > max {
        return Err(Error::Validation(format!(
            "limit must be between 1 and {max}, got {limit}"
        )));
    }
    Ok(())
}
