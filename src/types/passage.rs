//! Retrieved passage types

use serde::{Deserialize, Serialize};

/// A document chunk returned by semantic search, with its per-query distance
///
/// Passages are owned by the chunk store; this service only ever reads them.
/// `distance` is normalized cosine distance in `[0, 2]`, smaller is more
/// relevant. It is computed per query, not a property of the passage itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPassage {
    /// Chunk text content
    pub text: String,
    /// Title of the document the chunk was derived from
    pub title: String,
    /// Opaque locator of the original document
    pub source: String,
    /// Semantic dissimilarity to the query
    pub distance: f64,
}

impl ScoredPassage {
    /// Distance assigned when the store omits distance metadata
    pub const DEFAULT_DISTANCE: f64 = 1.0;

    pub fn new(
        text: impl Into<String>,
        title: impl Into<String>,
        source: impl Into<String>,
        distance: f64,
    ) -> Self {
        Self {
            text: text.into(),
            title: title.into(),
            source: source.into(),
            distance,
        }
    }
}
