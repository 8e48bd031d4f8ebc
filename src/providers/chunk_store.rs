//! Chunk store provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::passage::ScoredPassage;

/// Result of a pipelined retrieval + grouped generation call
#[derive(Debug, Clone, Default)]
pub struct GroupedGeneration {
    /// Generated answer; `None` when the provider produced no content
    pub answer: Option<String>,
    /// Passages the answer was grounded on, in the order they were used
    pub passages: Vec<ScoredPassage>,
}

/// Trait for the vector-indexed passage collection
///
/// Implementations:
/// - `WeaviateStore`: Weaviate Cloud collection with provider-backed
///   vectorization and grouped-task generation
/// - test fakes with scripted results
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Whether the store connection reports ready
    async fn is_ready(&self) -> bool;

    /// Whether the target collection handle was acquired at startup
    fn collection_available(&self) -> bool;

    /// Semantic nearest-neighbor lookup; results come back in the store's
    /// own ranking, ascending distance
    async fn near_text(&self, query: &str, limit: usize) -> Result<Vec<ScoredPassage>>;

    /// Pipelined retrieval + generation: retrieve up to `limit` passages for
    /// `query` and ask the generation provider to complete `task` grounded
    /// on their aggregated text
    async fn generate_from_text(
        &self,
        query: &str,
        limit: usize,
        task: &str,
    ) -> Result<GroupedGeneration>;

    /// Release the connection; called once at shutdown
    async fn close(&self);

    /// Provider name for logging
    fn name(&self) -> &str;
}
