//! `pdf-extract` backend: collects one glyph run per text-show operation.

use std::panic::{self, AssertUnwindSafe};

use pdf_extract::{Dictionary, Document, MediaBox, Object, OutputDev, OutputError, Transform};
use tracing::{debug, warn};

use crate::extraction::error::ExtractError;
use crate::extraction::models::{Glyph, PageDimensions};
use crate::source::dates::normalize_pdf_date;
use crate::source::{DecodedDocument, DecodedPage, PdfBackend, RawMetadata};

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractBackend;

impl PdfBackend for PdfExtractBackend {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedDocument, ExtractError> {
        let mut doc = Document::load_mem(bytes).map_err(|e| classify_load_error(&e.to_string()))?;

        if doc.is_encrypted() && doc.decrypt("").is_err() {
            return Err(ExtractError::PasswordRequired);
        }

        let metadata = read_metadata(&doc);
        let mut collector = GlyphCollector::default();

        // The decoder asserts on some malformed content streams.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::output_doc(&doc, &mut collector)
        }));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(ExtractError::InvalidDocument(e.to_string())),
            Err(_) => {
                warn!("PDF decoder panicked on malformed content");
                return Err(ExtractError::InvalidDocument(
                    "the file may be corrupted or not a valid PDF document".to_string(),
                ));
            }
        }

        let pages = collector.finish();
        debug!(pages = pages.len(), "PDF decoded");
        Ok(DecodedDocument { metadata, pages })
    }
}

fn classify_load_error(message: &str) -> ExtractError {
    let lower = message.to_lowercase();
    if lower.contains("password") || lower.contains("decrypt") {
        ExtractError::PasswordRequired
    } else {
        ExtractError::InvalidDocument(message.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Glyph collection
// ────────────────────────────────────────────────────────────────────────────

/// Text accumulated between `begin_word` and `end_word`.
///
/// `pdf-extract` reports the text rendering matrix without the font size, so
/// the stored transform is scaled by it to match the usual `[a b c d e f]` form.
struct GlyphRun {
    text: String,
    transform: [f64; 6],
    end_x: f64,
    height: f64,
}

impl GlyphRun {
    fn start(trm: &Transform, font_size: f64) -> Self {
        Self {
            text: String::new(),
            transform: [
                trm.m11 * font_size,
                trm.m12 * font_size,
                trm.m21 * font_size,
                trm.m22 * font_size,
                trm.m31,
                trm.m32,
            ],
            end_x: trm.m31,
            height: font_size * trm.m21.hypot(trm.m22),
        }
    }

    fn push(&mut self, trm: &Transform, width: f64, spacing: f64, font_size: f64, ch: &str) {
        self.text.push_str(ch);
        let advance = (width * font_size + spacing) * trm.m11.hypot(trm.m12);
        self.end_x = self.end_x.max(trm.m31 + advance);
    }

    fn into_glyph(self) -> Option<Glyph> {
        if self.text.is_empty() {
            return None;
        }
        let start_x = self.transform[4];
        Some(Glyph {
            text: self.text,
            transform: self.transform,
            width: (self.end_x - start_x).max(0.0),
            height: self.height,
            font_name: None,
        })
    }
}

#[derive(Default)]
struct GlyphCollector {
    pages: Vec<DecodedPage>,
    current: Option<DecodedPage>,
    run: Option<GlyphRun>,
}

impl GlyphCollector {
    fn flush_run(&mut self) {
        let Some(glyph) = self.run.take().and_then(GlyphRun::into_glyph) else {
            return;
        };
        if let Some(page) = self.current.as_mut() {
            page.glyphs.push(glyph);
        }
    }

    fn finish(mut self) -> Vec<DecodedPage> {
        self.flush_run();
        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }
        self.pages
    }
}

impl OutputDev for GlyphCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.current = Some(DecodedPage {
            dimensions: PageDimensions {
                width: (media_box.urx - media_box.llx).abs(),
                height: (media_box.ury - media_box.lly).abs(),
            },
            glyphs: Vec::new(),
        });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush_run();
        if let Some(page) = self.current.take() {
            self.pages.push(page);
        }
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        spacing: f64,
        font_size: f64,
        ch: &str,
    ) -> Result<(), OutputError> {
        self.run
            .get_or_insert_with(|| GlyphRun::start(trm, font_size))
            .push(trm, width, spacing, font_size, ch);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        self.flush_run();
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        self.flush_run();
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document information dictionary
// ────────────────────────────────────────────────────────────────────────────

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn read_metadata(doc: &Document) -> RawMetadata {
    let Some(info) = info_dictionary(doc) else {
        return RawMetadata::default();
    };
    let field = |key: &[u8]| match info.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    };

    RawMetadata {
        title: field(b"Title"),
        author: field(b"Author"),
        subject: field(b"Subject"),
        creation_date: field(b"CreationDate").map(|d| normalize_pdf_date(&d)),
        modification_date: field(b"ModDate").map(|d| normalize_pdf_date(&d)),
    }
}

/// PDF text strings: UTF-16BE with a byte-order mark, UTF-8 with a BOM, or
/// single-byte PDFDocEncoding (decoded as Latin-1).
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    let decoded: String = if let Some(rest) = bytes.strip_prefix(&[0xFE_u8, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        char::decode_utf16(units)
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF_u8, 0xBB, 0xBF]) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    };
    decoded.trim_end_matches('\0').to_string()
}
