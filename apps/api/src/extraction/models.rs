use serde::{Deserialize, Serialize};

/// A positioned text fragment as reported by the PDF backend.
///
/// `transform` is the 2D affine matrix `[a, b, c, d, e, f]`; `e`/`f` carry the
/// x/y translation in PDF user space (y grows upwards).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub text: String,
    pub transform: [f64; 6],
    pub width: f64,
    pub height: f64,
    /// Not every backend reports font names.
    pub font_name: Option<String>,
}

impl Glyph {
    pub fn x(&self) -> f64 {
        self.transform[4]
    }

    pub fn y(&self) -> f64 {
        self.transform[5]
    }
}

/// Glyphs sharing a bucketed vertical coordinate, ordered left-to-right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub y: f64,
    pub glyphs: Vec<Glyph>,
}

impl Line {
    /// Glyph texts joined by a single space.
    pub fn text(&self) -> String {
        self.glyphs
            .iter()
            .map(|g| g.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-based.
    pub page_number: u32,
    pub text: String,
    pub lines: Vec<Line>,
    pub dimensions: PageDimensions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Table,
    ResumeSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    pub x: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub y: f64,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Cell texts joined with ` | `.
    pub fn pipe_joined(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A run of consecutive multi-item lines flagged as tabular or as a resume section block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRegion {
    pub page_number: u32,
    pub start_y: f64,
    pub end_y: f64,
    pub rows: Vec<TableRow>,
    pub kind: RegionKind,
}

impl TableRegion {
    pub fn rows_text(&self) -> String {
        self.rows
            .iter()
            .map(TableRow::pipe_joined)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// Best-effort document information. Absent fields fall back to `Untitled` /
/// `Unknown` / empty strings; a missing field is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub page_count: u32,
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creation_date: String,
    pub modification_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuredBlock {
    Metadata {
        content: String,
    },
    Page {
        page_number: u32,
        content: String,
        has_tables: bool,
    },
    Table {
        page_number: u32,
        content: String,
    },
}

/// Aggregate result of one extraction pass. Built once per uploaded file and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub full_text: String,
    pub metadata: DocumentMetadata,
    pub pages: Vec<PageRecord>,
    pub tables: Vec<TableRegion>,
    pub structured_text: Vec<StructuredBlock>,
}
