//! Document Structurer: merges per-page output into one `DocumentRecord`.

use crate::extraction::models::{
    DocumentMetadata, DocumentRecord, PageRecord, StructuredBlock, TableRegion,
};

pub fn build_document(
    metadata: DocumentMetadata,
    pages: Vec<PageRecord>,
    tables: Vec<TableRegion>,
) -> DocumentRecord {
    let full_text: String = pages
        .iter()
        .map(|p| format!("{}\n\n", p.text))
        .collect();
    let structured_text = structure_blocks(&metadata, &pages, &tables);

    DocumentRecord {
        full_text,
        metadata,
        pages,
        tables,
        structured_text,
    }
}

fn structure_blocks(
    metadata: &DocumentMetadata,
    pages: &[PageRecord],
    tables: &[TableRegion],
) -> Vec<StructuredBlock> {
    let mut blocks = Vec::with_capacity(1 + pages.len() + tables.len());

    if !metadata.title.is_empty() || !metadata.author.is_empty() {
        blocks.push(StructuredBlock::Metadata {
            content: format!(
                "Document: {}\nAuthor: {}\nPages: {}",
                metadata.title, metadata.author, metadata.page_count
            ),
        });
    }

    blocks.extend(pages.iter().map(|page| StructuredBlock::Page {
        page_number: page.page_number,
        content: page.text.clone(),
        has_tables: tables.iter().any(|t| t.page_number == page.page_number),
    }));

    blocks.extend(tables.iter().map(|table| StructuredBlock::Table {
        page_number: table.page_number,
        content: format!("Table on page {}:\n{}", table.page_number, table.rows_text()),
    }));

    blocks
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::extraction::models::{
        PageDimensions, RegionKind, TableCell, TableRow, DEFAULT_AUTHOR, DEFAULT_TITLE,
    };

    pub(crate) fn metadata(pages: u32) -> DocumentMetadata {
        DocumentMetadata {
            page_count: pages,
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            subject: String::new(),
            creation_date: String::new(),
            modification_date: String::new(),
        }
    }

    pub(crate) fn page(page_number: u32, text: &str) -> PageRecord {
        PageRecord {
            page_number,
            text: text.to_string(),
            lines: Vec::new(),
            dimensions: PageDimensions {
                width: 612.0,
                height: 792.0,
            },
        }
    }

    pub(crate) fn table(page_number: u32, rows: &[&[&str]]) -> TableRegion {
        TableRegion {
            page_number,
            start_y: 700.0,
            end_y: 600.0,
            rows: rows
                .iter()
                .map(|cells| TableRow {
                    y: 700.0,
                    cells: cells
                        .iter()
                        .enumerate()
                        .map(|(i, text)| TableCell {
                            text: text.to_string(),
                            x: i as f64 * 100.0,
                            width: 40.0,
                        })
                        .collect(),
                })
                .collect(),
            kind: RegionKind::Table,
        }
    }

    #[test]
    fn test_full_text_separates_pages_with_blank_line() {
        let doc = build_document(
            metadata(2),
            vec![page(1, "a b c"), page(2, "d e")],
            vec![],
        );
        assert_eq!(doc.full_text, "a b c\n\nd e\n\n");
    }

    #[test]
    fn test_structured_blocks_order_and_has_tables() {
        let doc = build_document(
            metadata(2),
            vec![page(1, "first"), page(2, "second")],
            vec![table(2, &[&["Rust", "Go"]])],
        );

        assert_eq!(doc.structured_text.len(), 4);
        assert_eq!(
            doc.structured_text[0],
            StructuredBlock::Metadata {
                content: "Document: Untitled\nAuthor: Unknown\nPages: 2".to_string()
            }
        );
        assert!(matches!(
            doc.structured_text[1],
            StructuredBlock::Page { page_number: 1, has_tables: false, .. }
        ));
        assert!(matches!(
            doc.structured_text[2],
            StructuredBlock::Page { page_number: 2, has_tables: true, .. }
        ));
        assert_eq!(
            doc.structured_text[3],
            StructuredBlock::Table {
                page_number: 2,
                content: "Table on page 2:\nRust | Go".to_string()
            }
        );
    }

    #[test]
    fn test_metadata_block_skipped_without_title_or_author() {
        let mut meta = metadata(1);
        meta.title.clear();
        meta.author.clear();
        let doc = build_document(meta, vec![page(1, "x")], vec![]);
        assert!(matches!(doc.structured_text[0], StructuredBlock::Page { .. }));
    }
}
