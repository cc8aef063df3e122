use anyhow::{Context, Result};

use crate::extraction::lines::DEFAULT_LINE_TOLERANCE;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound for uploaded and fetched documents.
    pub max_upload_bytes: usize,
    /// Vertical distance (points) within which glyphs share a line.
    pub line_tolerance: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let line_tolerance = optional_env("LINE_TOLERANCE", DEFAULT_LINE_TOLERANCE)?;
        anyhow::ensure!(
            line_tolerance > 0.0,
            "LINE_TOLERANCE must be positive, got {line_tolerance}"
        );

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            line_tolerance,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
