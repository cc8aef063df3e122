//! AI-Context Formatter: flattens a `DocumentRecord` for inclusion in an LLM prompt.

use crate::extraction::models::DocumentRecord;

/// Renders the document as a single text blob. Deterministic: the same record
/// always yields byte-identical output.
pub fn format_for_ai(doc: &DocumentRecord) -> String {
    let mut out = String::new();
    let meta = &doc.metadata;

    if !meta.title.is_empty() {
        out.push_str(&format!("DOCUMENT: {}\n", meta.title));
    }
    if !meta.author.is_empty() {
        out.push_str(&format!("AUTHOR: {}\n", meta.author));
    }
    out.push_str(&format!("PAGES: {}\n\n", meta.page_count));

    for page in &doc.pages {
        out.push_str(&format!(
            "--- PAGE {} ---\n{}\n\n",
            page.page_number, page.text
        ));
    }

    if !doc.tables.is_empty() {
        out.push_str("--- TABLES FOUND ---\n");
        for table in &doc.tables {
            out.push_str(&format!("Table on page {}:\n", table.page_number));
            for row in &table.rows {
                out.push_str(&row.pipe_joined());
                out.push('\n');
            }
            out.push('\n');
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::structurer::build_document;
    use crate::extraction::structurer::tests::{metadata, page, table};

    #[test]
    fn test_format_layout() {
        let doc = build_document(
            metadata(2),
            vec![page(1, "Jane Doe\nEngineer"), page(2, "Skills")],
            vec![table(2, &[&["Rust", "Go", "SQL"], &["5y", "3y", "8y"]])],
        );
        let expected = "DOCUMENT: Untitled\nAUTHOR: Unknown\nPAGES: 2\n\n\
            --- PAGE 1 ---\nJane Doe\nEngineer\n\n\
            --- PAGE 2 ---\nSkills\n\n\
            --- TABLES FOUND ---\nTable on page 2:\nRust | Go | SQL\n5y | 3y | 8y";
        assert_eq!(format_for_ai(&doc), expected);
    }

    #[test]
    fn test_empty_title_and_author_are_omitted() {
        let mut meta = metadata(1);
        meta.title.clear();
        meta.author.clear();
        let doc = build_document(meta, vec![page(1, "body")], vec![]);
        assert_eq!(format_for_ai(&doc), "PAGES: 1\n\n--- PAGE 1 ---\nbody");
    }

    #[test]
    fn test_format_is_idempotent() {
        let doc = build_document(
            metadata(1),
            vec![page(1, "Experience\nAcme 2020-01-15")],
            vec![table(1, &[&["Acme", "Engineer", "2020-01-15"]])],
        );
        assert_eq!(format_for_ai(&doc), format_for_ai(&doc));
    }
}
