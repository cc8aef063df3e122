//! Axum route handlers for the Chat and Analysis APIs.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chat::matching::{match_resume, MatchReport};
use crate::chat::prompts::{build_chat_prompt, CHAT_SYSTEM};
use crate::errors::AppError;
use crate::extraction::{format_for_ai, DocumentRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub document: Option<DocumentRecord>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub document: DocumentRecord,
    pub job_description: String,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message is required".to_string()));
    }

    let context = req.document.as_ref().map(format_for_ai);
    let prompt = build_chat_prompt(
        &req.message,
        context.as_deref(),
        req.job_description.as_deref(),
    );
    info!(
        with_document = context.is_some(),
        prompt_chars = prompt.len(),
        "chat request"
    );

    let response = state.llm.call_text(&prompt, CHAT_SYSTEM).await?;
    Ok(Json(ChatResponse { response }))
}

/// POST /api/v1/analysis/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation("job_description is required".to_string()));
    }
    let report = match_resume(&req.document, &req.job_description, &state.llm).await?;
    Ok(Json(report))
}
