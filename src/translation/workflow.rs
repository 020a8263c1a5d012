/*!
 * Article translation workflow.
 *
 * Extract → translate → reinsert, with the arena living for exactly one
 * document. The returned futures hold the document tree across the provider
 * call and are therefore not `Send`; await them where they are created.
 */

use comrak::Arena;
use log::{debug, info};

use crate::errors::TranslationError;
use crate::markdown::{self, MarkdownOptions};
use crate::text_stats::DocumentStats;

use super::core::TranslationService;

/// An article as written by its author: a plain-text title and a Markdown body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub body: String,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Result of translating an [`Article`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedArticle {
    pub title: String,
    pub body: String,
    /// Stats of the source body
    pub stats: DocumentStats,
}

/// Runs documents through the round-trip pipeline with a translation service
#[derive(Debug)]
pub struct ArticleTranslator {
    service: TranslationService,
    options: MarkdownOptions,
}

impl ArticleTranslator {
    pub fn new(service: TranslationService, options: MarkdownOptions) -> Self {
        Self { service, options }
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Translate a Markdown document, keeping its structure
    pub async fn translate_markdown(
        &self,
        markdown: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let article = Article::new("", markdown);
        let translated = self.translate_article(&article, source_language, target_language).await?;
        Ok(translated.body)
    }

    /// Translate the title and body of an article in one provider round
    ///
    /// The title is plain text and goes first in the list, followed by the body
    /// fragments in document order.
    pub async fn translate_article(
        &self,
        article: &Article,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslatedArticle, TranslationError> {
        let arena = Arena::new();
        let document = markdown::extract(&arena, &article.body, &self.options)?;
        let stats = DocumentStats::from_document(&document);

        debug!(
            "Article has {} fragments ({} words, {} tables)",
            stats.fragments, stats.words, stats.tables
        );

        let mut texts = Vec::with_capacity(document.fragment_count() + 1);
        texts.push(article.title.clone());
        texts.extend(document.fragment_values());

        let mut translated = self.service
            .translate_texts(&texts, source_language, target_language)
            .await?;

        let body_translations: Vec<String> = translated
            .split_off(1.min(translated.len()))
            .iter()
            .zip(&document.fragments)
            .map(|(translation, fragment)| keep_boundary_whitespace(&fragment.value, translation))
            .collect();
        let title = translated.into_iter().next().unwrap_or_default();

        let body = document.reinsert(&body_translations, &self.options)?;
        info!(
            "Translated {} fragments from {} to {}",
            stats.fragments, source_language, target_language
        );

        Ok(TranslatedArticle { title, body, stats })
    }
}

/// Put the source fragment's leading and trailing whitespace around its translation
///
/// Translation engines trim their output, which would glue words to the
/// neighbouring code spans and emphasis marks.
pub fn keep_boundary_whitespace(source: &str, translation: &str) -> String {
    if source.trim().is_empty() {
        return translation.to_string();
    }
    let leading = &source[..source.len() - source.trim_start().len()];
    let trailing = &source[source.trim_end().len()..];
    format!("{}{}{}", leading, translation.trim(), trailing)
}
