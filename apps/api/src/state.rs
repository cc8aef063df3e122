use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ExtractOptions;
use crate::llm_client::LlmClient;
use crate::source::{PdfBackend, SourceFetcher};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable decoder. Default: PdfExtractBackend.
    pub backend: Arc<dyn PdfBackend>,
    /// Remote document retrieval for `extract-url`.
    pub fetcher: Arc<dyn SourceFetcher>,
    /// Baseline options; the request's mode is applied on top.
    pub extract_options: ExtractOptions,
}
