use serde::{Deserialize, Serialize};

use crate::extraction::models::DocumentRecord;

/// Summary counts shown alongside an extracted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub total_characters: usize,
    pub total_words: usize,
    pub total_sentences: usize,
    pub average_words_per_sentence: f64,
    pub total_pages: u32,
    pub has_tables: bool,
    pub table_count: usize,
}

pub fn compute_statistics(doc: &DocumentRecord) -> TextStatistics {
    let text = &doc.full_text;
    let total_words = text.split_whitespace().count();
    let total_sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    let average_words_per_sentence = if total_sentences == 0 {
        0.0
    } else {
        total_words as f64 / total_sentences as f64
    };

    TextStatistics {
        total_characters: text.chars().count(),
        total_words,
        total_sentences,
        average_words_per_sentence,
        total_pages: doc.metadata.page_count,
        has_tables: !doc.tables.is_empty(),
        table_count: doc.tables.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::structurer::build_document;
    use crate::extraction::structurer::tests::{metadata, page, table};

    #[test]
    fn test_two_page_word_and_page_count() {
        let doc = build_document(metadata(2), vec![page(1, "a b c"), page(2, "d e")], vec![]);
        let stats = compute_statistics(&doc);
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.total_pages, 2);
        assert_eq!(stats.total_sentences, 1);
        assert!((stats.average_words_per_sentence - 5.0).abs() < f64::EPSILON);
        assert!(!stats.has_tables);
        assert_eq!(stats.table_count, 0);
    }

    #[test]
    fn test_sentences_split_on_terminal_punctuation() {
        let doc = build_document(
            metadata(1),
            vec![page(1, "Built APIs. Led a team!! Why Rust? Because")],
            vec![table(1, &[&["x", "y", "z"]])],
        );
        let stats = compute_statistics(&doc);
        assert_eq!(stats.total_sentences, 4);
        assert_eq!(stats.total_words, 8);
        assert!((stats.average_words_per_sentence - 2.0).abs() < f64::EPSILON);
        assert!(stats.has_tables);
        assert_eq!(stats.table_count, 1);
    }

    #[test]
    fn test_empty_document_has_zero_average() {
        let doc = build_document(metadata(1), vec![page(1, "")], vec![]);
        let stats = compute_statistics(&doc);
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.total_sentences, 0);
        assert_eq!(stats.average_words_per_sentence, 0.0);
        assert_eq!(stats.total_characters, 2);
    }
}
