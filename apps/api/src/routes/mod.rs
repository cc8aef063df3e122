pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat;
use crate::documents::handlers as documents;
use crate::state::AppState;

/// Headroom for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        // Documents API
        .route("/api/v1/documents/extract", post(documents::handle_extract))
        .route(
            "/api/v1/documents/extract-url",
            post(documents::handle_extract_url),
        )
        .route("/api/v1/documents/context", post(documents::handle_context))
        .route("/api/v1/documents/sections", post(documents::handle_sections))
        .route(
            "/api/v1/documents/statistics",
            post(documents::handle_statistics),
        )
        .route("/api/v1/documents/search", post(documents::handle_search))
        // Chat / Analysis API
        .route("/api/v1/chat", post(chat::handle_chat))
        .route("/api/v1/analysis/match", post(chat::handle_match))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
