//! iso-rag: Retrieval-augmented query service for ISO medical device documents
//!
//! This crate exposes semantic search and RAG question answering over a
//! Weaviate Cloud collection of pre-ingested document chunks. Retrieval
//! ranking and answer generation are delegated to the hosted store and its
//! configured model providers; the service itself does validation,
//! orchestration, response shaping, and health reporting.

pub mod config;
pub mod error;
pub mod generation;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use providers::{ChunkStore, GroupedGeneration};
pub use retrieval::QueryService;
pub use types::{
    passage::ScoredPassage,
    query::{RagRequest, SearchRequest},
    response::{HealthResponse, HealthStatus, RagResponse},
};
