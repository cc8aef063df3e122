//! Source documents: the scoped in-memory blob, the decoder seam and remote fetching.

pub mod blob;
pub mod dates;
pub mod fetch;
pub mod pdf;

use crate::extraction::error::ExtractError;
use crate::extraction::models::{
    DocumentMetadata, Glyph, PageDimensions, DEFAULT_AUTHOR, DEFAULT_TITLE,
};

pub use blob::{SourceBlob, SourceOrigin};
pub use fetch::{HttpFetcher, SourceFetcher};
pub use pdf::PdfExtractBackend;

/// Decoder seam. Implementors turn raw bytes into positioned glyph runs per page;
/// layout reconstruction lives in [`crate::extraction`].
pub trait PdfBackend: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, ExtractError>;
}

#[derive(Debug, Clone)]
pub struct DecodedPage {
    pub dimensions: PageDimensions,
    pub glyphs: Vec<Glyph>,
}

#[derive(Debug, Clone, Default)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
}

impl RawMetadata {
    /// Applies the fallbacks: `Untitled`, `Unknown`, otherwise empty.
    pub fn into_metadata(self, page_count: u32) -> DocumentMetadata {
        let or = |value: Option<String>, fallback: &str| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        DocumentMetadata {
            page_count,
            title: or(self.title, DEFAULT_TITLE),
            author: or(self.author, DEFAULT_AUTHOR),
            subject: or(self.subject, ""),
            creation_date: or(self.creation_date, ""),
            modification_date: or(self.modification_date, ""),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecodedDocument {
    pub metadata: RawMetadata,
    pub pages: Vec<DecodedPage>,
}
