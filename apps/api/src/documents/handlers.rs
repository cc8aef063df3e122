//! Axum route handlers for the Documents API.

use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::documents::upload::validate_upload;
use crate::errors::AppError;
use crate::extraction::search::KeywordHit;
use crate::extraction::sections::ResumeSections;
use crate::extraction::statistics::TextStatistics;
use crate::extraction::{
    classify_sections, compute_statistics, extract_document, format_for_ai, search_keywords,
    DocumentRecord, ExtractMode,
};
use crate::source::{SourceBlob, SourceOrigin};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ModeQuery {
    #[serde(default)]
    pub mode: ExtractMode,
}

#[derive(Debug, Deserialize)]
pub struct ExtractUrlRequest {
    pub url: String,
    #[serde(default)]
    pub mode: ExtractMode,
}

#[derive(Debug, Serialize)]
pub struct ExtractionResponse {
    pub extraction_id: Uuid,
    pub file_name: String,
    pub document: DocumentRecord,
    pub statistics: TextStatistics,
    pub sections: ResumeSections,
    pub ai_context: String,
}

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub document: DocumentRecord,
}

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub ai_context: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub document: DocumentRecord,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: BTreeMap<String, Vec<KeywordHit>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Query(query): Query<ModeQuery>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        validate_upload(
            content_type.as_deref(),
            &file_name,
            data.len(),
            state.config.max_upload_bytes,
        )?;

        let blob = SourceBlob::new(
            data,
            SourceOrigin::Upload {
                file_name: file_name.clone(),
            },
        );
        return run_extraction(&state, blob, file_name, query.mode).await.map(Json);
    }

    Err(AppError::Validation(
        "Please choose a resume file (multipart field 'file').".to_string(),
    ))
}

/// POST /api/v1/documents/extract-url
pub async fn handle_extract_url(
    State(state): State<AppState>,
    Json(req): Json<ExtractUrlRequest>,
) -> Result<Json<ExtractionResponse>, AppError> {
    let url = req.url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("url is required".to_string()));
    }

    let blob = state.fetcher.fetch(url).await?;
    let file_name = file_name_from_url(url);
    run_extraction(&state, blob, file_name, req.mode).await.map(Json)
}

/// POST /api/v1/documents/context
pub async fn handle_context(Json(req): Json<DocumentRequest>) -> Json<ContextResponse> {
    Json(ContextResponse {
        ai_context: format_for_ai(&req.document),
    })
}

/// POST /api/v1/documents/sections
pub async fn handle_sections(Json(req): Json<DocumentRequest>) -> Json<ResumeSections> {
    Json(classify_sections(&req.document))
}

/// POST /api/v1/documents/statistics
pub async fn handle_statistics(Json(req): Json<DocumentRequest>) -> Json<TextStatistics> {
    Json(compute_statistics(&req.document))
}

/// POST /api/v1/documents/search
pub async fn handle_search(
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    if req.keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(AppError::Validation(
            "at least one non-blank keyword is required".to_string(),
        ));
    }
    Ok(Json(SearchResponse {
        results: search_keywords(&req.document, &req.keywords),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Runs the pipeline and every derived view on the blocking pool.
async fn run_extraction(
    state: &AppState,
    blob: SourceBlob,
    file_name: String,
    mode: ExtractMode,
) -> Result<ExtractionResponse, AppError> {
    let extraction_id = blob.id();
    debug!(
        %extraction_id,
        origin = ?blob.origin(),
        bytes = blob.byte_len(),
        ?mode,
        "extraction started"
    );
    let backend = state.backend.clone();
    let options = state.extract_options.with_mode(mode);

    let (document, statistics, sections, ai_context) = tokio::task::spawn_blocking(move || {
        let document = extract_document(blob, backend.as_ref(), &options)?;
        let statistics = compute_statistics(&document);
        let sections = classify_sections(&document);
        let ai_context = format_for_ai(&document);
        Ok::<_, AppError>((document, statistics, sections, ai_context))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;

    info!(
        %extraction_id,
        file_name = %file_name,
        ?mode,
        pages = document.metadata.page_count,
        tables = document.tables.len(),
        "document extracted"
    );

    Ok(ExtractionResponse {
        extraction_id,
        file_name,
        document,
        statistics,
        sections,
        ai_context,
    })
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

fn file_name_from_url(url: &str) -> String {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').find(|s| !s.is_empty()))
        .filter(|s| !s.contains(':'))
        .unwrap_or("document.pdf")
        .to_string()
}
