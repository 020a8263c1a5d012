use serde::Serialize;

use crate::markdown::ExtractedDocument;

/// Count whitespace-separated words; blank input has none
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Size of the translatable part of a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub fragments: usize,
    pub characters: usize,
    pub words: usize,
    pub tables: usize,
}

impl DocumentStats {
    pub fn from_document(document: &ExtractedDocument<'_>) -> Self {
        let mut stats = Self {
            tables: document.table_count(),
            ..Self::default()
        };
        for fragment in &document.fragments {
            stats.fragments += 1;
            stats.characters += fragment.value.chars().count();
            stats.words += count_words(&fragment.value);
        }
        stats
    }
}
