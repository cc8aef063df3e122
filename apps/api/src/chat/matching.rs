//! Resume / job-description matching via the LLM.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::chat::prompts::{build_match_prompt, MATCH_SYSTEM};
use crate::errors::AppError;
use crate::extraction::{format_for_ai, DocumentRecord};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// Structured verdict returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// 0..=100. Any JSON number is accepted, then rounded and clamped.
    #[serde(deserialize_with = "deserialize_score")]
    pub match_score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

pub async fn match_resume(
    document: &DocumentRecord,
    job_description: &str,
    llm: &LlmClient,
) -> Result<MatchReport, AppError> {
    let prompt = build_match_prompt(&format_for_ai(document), job_description);
    let system = format!("{MATCH_SYSTEM} {JSON_ONLY_SYSTEM}");

    let report: MatchReport = llm.call_json(&prompt, &system).await?;

    info!(
        match_score = report.match_score,
        strengths = report.strengths.len(),
        gaps = report.gaps.len(),
        "resume matched"
    );
    Ok(report)
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_score(raw))
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
