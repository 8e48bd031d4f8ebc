//! Grounding prompt assembly for RAG generation

pub mod prompt;

pub use prompt::PromptBuilder;
