//! Extraction pipeline: runs grouping, assembly and detection over every page.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::error::ExtractError;
use crate::extraction::lines::{group_into_lines, DEFAULT_LINE_TOLERANCE};
use crate::extraction::models::DocumentRecord;
use crate::extraction::page::assemble_page;
use crate::extraction::structurer::build_document;
use crate::extraction::tables::detect_regions;
use crate::source::{DecodedDocument, PdfBackend, SourceBlob};

/// `TextOnly` is the degraded mode: same line grouping, no table/section detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractMode {
    #[default]
    Full,
    TextOnly,
}

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub line_tolerance: f64,
    pub detect_tables: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            detect_tables: true,
        }
    }
}

impl ExtractOptions {
    pub fn with_mode(mut self, mode: ExtractMode) -> Self {
        self.detect_tables = mode == ExtractMode::Full;
        self
    }
}

/// Decodes the blob and structures it. The blob is consumed: it is released when
/// this function returns, whichever way it returns.
pub fn extract_document(
    blob: SourceBlob,
    backend: &dyn PdfBackend,
    options: &ExtractOptions,
) -> Result<DocumentRecord, ExtractError> {
    let decoded = backend.decode(blob.as_bytes())?;
    drop(blob);
    Ok(structure_decoded(decoded, options))
}

/// Pages are processed strictly in order and renumbered 1..=n.
pub fn structure_decoded(decoded: DecodedDocument, options: &ExtractOptions) -> DocumentRecord {
    let page_count = decoded.pages.len() as u32;
    let mut pages = Vec::with_capacity(decoded.pages.len());
    let mut tables = Vec::new();

    for (idx, page) in decoded.pages.into_iter().enumerate() {
        let page_number = idx as u32 + 1;
        let groups = group_into_lines(&page.glyphs, options.line_tolerance);

        if options.detect_tables {
            tables.extend(detect_regions(&groups, page_number));
        }
        debug!(
            page_number,
            glyphs = page.glyphs.len(),
            lines = groups.line_count(),
            "page assembled"
        );
        pages.push(assemble_page(&groups, page_number, page.dimensions));
    }

    build_document(decoded.metadata.into_metadata(page_count), pages, tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    use crate::extraction::lines::tests::glyph;
    use crate::extraction::models::{PageDimensions, RegionKind};
    use crate::source::{DecodedPage, RawMetadata, SourceOrigin};

    struct FixtureBackend(fn() -> DecodedDocument);

    impl PdfBackend for FixtureBackend {
        fn decode(&self, _bytes: &[u8]) -> Result<DecodedDocument, ExtractError> {
            Ok((self.0)())
        }
    }

    struct BrokenBackend;

    impl PdfBackend for BrokenBackend {
        fn decode(&self, _bytes: &[u8]) -> Result<DecodedDocument, ExtractError> {
            Err(ExtractError::InvalidDocument("not a PDF".to_string()))
        }
    }

    const LETTER: PageDimensions = PageDimensions {
        width: 612.0,
        height: 792.0,
    };

    fn resume() -> DecodedDocument {
        DecodedDocument {
            metadata: RawMetadata {
                title: Some("Jane Doe Resume".to_string()),
                ..RawMetadata::default()
            },
            pages: vec![
                DecodedPage {
                    dimensions: LETTER,
                    glyphs: vec![
                        glyph("Jane", 72.0, 720.0),
                        glyph("Doe", 110.0, 720.0),
                        glyph("Acme", 72.0, 650.0),
                        glyph("Engineer", 90.0, 650.0),
                        glyph("2020-01-15", 450.0, 650.0),
                    ],
                },
                DecodedPage {
                    dimensions: LETTER,
                    glyphs: vec![],
                },
            ],
        }
    }

    fn blob() -> SourceBlob {
        SourceBlob::new(
            Bytes::from_static(b"%PDF-1.7"),
            SourceOrigin::Upload {
                file_name: "resume.pdf".to_string(),
            },
        )
    }

    #[test]
    fn test_full_mode_builds_pages_and_regions() {
        let doc =
            extract_document(blob(), &FixtureBackend(resume), &ExtractOptions::default()).unwrap();

        assert_eq!(doc.metadata.page_count, 2);
        assert_eq!(doc.metadata.title, "Jane Doe Resume");
        assert_eq!(doc.metadata.author, "Unknown");
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].text, "Jane Doe\nAcme Engineer 2020-01-15");
        assert_eq!(doc.pages[1].text, "");
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].kind, RegionKind::ResumeSection);
        assert_eq!(doc.full_text, "Jane Doe\nAcme Engineer 2020-01-15\n\n\n\n");
    }

    #[test]
    fn test_text_only_mode_skips_detection() {
        let options = ExtractOptions::default().with_mode(ExtractMode::TextOnly);
        let doc = extract_document(blob(), &FixtureBackend(resume), &options).unwrap();
        assert!(doc.tables.is_empty());
        assert_eq!(doc.pages[0].text, "Jane Doe\nAcme Engineer 2020-01-15");
    }

    #[test]
    fn test_page_numbers_are_contiguous() {
        let doc =
            extract_document(blob(), &FixtureBackend(resume), &ExtractOptions::default()).unwrap();
        let numbers: Vec<u32> = doc.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_backend_failure_returns_no_document() {
        let err = extract_document(blob(), &BrokenBackend, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidDocument(_)));
    }
}
