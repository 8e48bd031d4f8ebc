//! Retrieval-augmented query orchestration

pub mod query;

pub use query::{QueryService, MAX_RAG_LIMIT, MAX_SEARCH_LIMIT};
