//! Page Text Assembler.

use crate::extraction::lines::LineGroups;
use crate::extraction::models::{Line, PageDimensions, PageRecord};

/// Builds the page record: line texts (glyphs joined by a space) top-to-bottom,
/// joined by newlines.
pub fn assemble_page(
    groups: &LineGroups,
    page_number: u32,
    dimensions: PageDimensions,
) -> PageRecord {
    let lines: Vec<Line> = groups.top_to_bottom().cloned().collect();
    let text = lines
        .iter()
        .map(Line::text)
        .collect::<Vec<_>>()
        .join("\n");

    PageRecord {
        page_number,
        text,
        lines,
        dimensions,
    }
}
