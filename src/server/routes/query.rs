//! Search and RAG question-answering endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::passage::ScoredPassage;
use crate::types::query::{RagRequest, SearchRequest};
use crate::types::response::RagResponse;

/// POST /search - semantic search over the document collection
pub async fn search_documents(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<ScoredPassage>>> {
    let passages = state
        .service()
        .search(&request.query, request.limit)
        .await?;
    Ok(Json(passages))
}

/// POST /ask - RAG question answering with grounded sources
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<RagRequest>,
) -> Result<Json<RagResponse>> {
    let response = state
        .service()
        .ask(&request.question, request.limit)
        .await?;
    Ok(Json(response))
}
