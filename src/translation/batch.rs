/*!
 * Batch translation processing.
 *
 * Fragments are grouped into provider requests bounded by a text count and a
 * character budget, sent concurrently, and put back in input order.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error};
use std::time::Instant;

use crate::errors::TranslationError;

use super::core::TranslationService;

/// One provider request worth of texts
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Position of the batch in the plan
    pub index: usize,
    /// `(position in the caller's list, text)`
    pub items: Vec<(usize, String)>,
}

impl Batch {
    pub fn texts(&self) -> Vec<String> {
        self.items.iter().map(|(_, text)| text.clone()).collect()
    }

    pub fn char_count(&self) -> usize {
        self.items.iter().map(|(_, text)| text.chars().count()).sum()
    }
}

/// Split `items` into batches of at most `max_texts` texts and roughly `max_chars`
/// characters
///
/// A text longer than `max_chars` still gets a batch of its own; fragments are
/// never cut, since the provider must answer one string per fragment.
pub fn plan_batches(items: Vec<(usize, String)>, max_texts: usize, max_chars: usize) -> Vec<Batch> {
    let max_texts = max_texts.max(1);
    let mut batches = Vec::new();
    let mut current: Vec<(usize, String)> = Vec::new();
    let mut current_chars = 0usize;

    for (position, text) in items {
        let chars = text.chars().count();
        let full = current.len() >= max_texts
            || (!current.is_empty() && current_chars + chars > max_chars);

        if full {
            batches.push(Batch {
                index: batches.len(),
                items: std::mem::take(&mut current),
            });
            current_chars = 0;
        }

        current_chars += chars;
        current.push((position, text));
    }

    if !current.is_empty() {
        batches.push(Batch {
            index: batches.len(),
            items: current,
        });
    }

    batches
}

/// Batch translator for sending planned batches concurrently
pub struct BatchTranslator<'s> {
    /// The translation service to use
    service: &'s TranslationService,

    /// Maximum number of requests in flight
    max_concurrent_requests: usize,
}

impl<'s> BatchTranslator<'s> {
    pub fn new(service: &'s TranslationService) -> Self {
        Self {
            max_concurrent_requests: service.options.max_concurrent_requests.max(1),
            service,
        }
    }

    /// Translate every batch and return `(position, translation)` pairs sorted by position
    ///
    /// The first failing batch, in plan order, fails the whole call.
    pub async fn translate_batches(
        &self,
        batches: Vec<Batch>,
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<(usize, String)>, TranslationError> {
        let total_batches = batches.len();

        let mut results = stream::iter(batches)
            .map(|batch| async move {
                let start_time = Instant::now();
                let texts = batch.texts();
                let result = self.service
                    .translate_batch_with_retry(batch.index, &texts, source_language, target_language)
                    .await;

                match &result {
                    Ok(_) => debug!(
                        "Batch {} of {} ({} texts, {} chars) completed in {:?}",
                        batch.index + 1,
                        total_batches,
                        batch.items.len(),
                        batch.char_count(),
                        start_time.elapsed()
                    ),
                    Err(e) => error!("Batch {} of {} failed: {}", batch.index + 1, total_batches, e),
                }

                (batch, result)
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|(batch, _)| batch.index);

        let mut translated = Vec::new();
        for (batch, result) in results {
            let texts = result?;
            translated.extend(batch.items.into_iter().map(|(position, _)| position).zip(texts));
        }
        translated.sort_by_key(|(position, _)| *position);

        Ok(translated)
    }
}
