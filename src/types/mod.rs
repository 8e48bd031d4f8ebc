//! Request and response contracts for the query service

pub mod passage;
pub mod query;
pub mod response;

pub use passage::ScoredPassage;
pub use query::{RagRequest, SearchRequest};
pub use response::{HealthResponse, HealthStatus, RagResponse, ServiceInfo};
