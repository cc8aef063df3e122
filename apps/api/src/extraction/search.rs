//! Free-form keyword lookup over page lines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extraction::models::DocumentRecord;

/// Lines of context kept on each side of a hit.
const CONTEXT_RADIUS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub page: u32,
    /// 1-based.
    pub line: usize,
    pub text: String,
    pub context: String,
}

/// Case-insensitive substring search. Blank keywords are ignored; every other
/// requested keyword gets an entry even when nothing matches.
pub fn search_keywords(
    doc: &DocumentRecord,
    keywords: &[String],
) -> BTreeMap<String, Vec<KeywordHit>> {
    let mut results: BTreeMap<String, Vec<KeywordHit>> = BTreeMap::new();

    for keyword in keywords.iter().map(|k| k.trim()).filter(|k| !k.is_empty()) {
        if results.contains_key(keyword) {
            continue;
        }
        let needle = keyword.to_lowercase();
        let mut hits = Vec::new();

        for page in &doc.pages {
            let lines: Vec<&str> = page.text.split('\n').collect();
            for (idx, line) in lines.iter().enumerate() {
                if !line.to_lowercase().contains(&needle) {
                    continue;
                }
                let start = idx.saturating_sub(CONTEXT_RADIUS);
                let end = (idx + CONTEXT_RADIUS + 1).min(lines.len());
                hits.push(KeywordHit {
                    page: page.page_number,
                    line: idx + 1,
                    text: line.trim().to_string(),
                    context: lines[start..end].join("\n"),
                });
            }
        }

        results.insert(keyword.to_string(), hits);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::structurer::build_document;
    use crate::extraction::structurer::tests::{metadata, page};

    #[test]
    fn test_hits_carry_two_lines_of_context_each_side() {
        let doc = build_document(
            metadata(1),
            vec![page(1, "l1\nl2\nl3\nKubernetes operator\nl5\nl6\nl7")],
            vec![],
        );
        let results = search_keywords(&doc, &["kubernetes".to_string()]);
        let hits = &results["kubernetes"];
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, 4);
        assert_eq!(hits[0].text, "Kubernetes operator");
        assert_eq!(hits[0].context, "l2\nl3\nKubernetes operator\nl5\nl6");
    }

    #[test]
    fn test_context_clamped_at_page_edges() {
        let doc = build_document(metadata(1), vec![page(1, "Rust\nGo")], vec![]);
        let results = search_keywords(&doc, &["rust".to_string()]);
        assert_eq!(results["rust"][0].context, "Rust\nGo");
    }

    #[test]
    fn test_missing_and_blank_keywords() {
        let doc = build_document(metadata(1), vec![page(1, "Rust")], vec![]);
        let results = search_keywords(&doc, &["haskell".to_string(), "  ".to_string()]);
        assert_eq!(results.len(), 1);
        assert!(results["haskell"].is_empty());
    }
}
