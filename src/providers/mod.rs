//! Provider abstraction for the external chunk store
//!
//! The store owns the hard parts (embeddings, nearest-neighbor search,
//! generation); this trait is the seam that lets tests substitute a scripted
//! fake for the hosted service.

pub mod chunk_store;
pub mod weaviate;

pub use chunk_store::{ChunkStore, GroupedGeneration};
pub use weaviate::WeaviateStore;
