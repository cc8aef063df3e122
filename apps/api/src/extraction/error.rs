use thiserror::Error;

/// Failure of a whole extraction pass. No partial document is ever returned.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid PDF: {0}")]
    InvalidDocument(String),

    #[error("Password required: this PDF is password-protected and cannot be processed")]
    PasswordRequired,

    #[error("Failed to fetch PDF: {0}")]
    SourceUnavailable(String),
}
