/*!
 * Core translation service implementation.
 *
 * `TranslationService` turns an ordered list of texts into an ordered list of
 * translations of the same length, whatever provider sits behind it.
 */

use anyhow::{anyhow, Result};
use log::{debug, error, warn};
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils;
use crate::providers::backend::Backend;
use crate::providers::libretranslate::LibreTranslate;
use crate::providers::mock::MockProvider;
use crate::providers::{LanguageInfo, Provider};

use super::batch::{plan_batches, BatchTranslator};
use super::cache::TranslationCache;

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// Article translation backend
    Backend { client: Backend },

    /// LibreTranslate server
    LibreTranslate { client: LibreTranslate },

    /// In-process mock
    Mock { client: MockProvider },
}

/// Send one request through any provider and pull the texts out
async fn request_texts<P: Provider>(
    client: &P,
    texts: &[String],
    source_language: &str,
    target_language: &str,
) -> Result<Vec<String>, ProviderError> {
    let request = client.make_request(texts, source_language, target_language);
    let response = client.complete(request).await?;
    Ok(P::extract_texts(&response))
}

/// Options for customizing the translation process
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Maximum number of concurrent requests
    pub max_concurrent_requests: usize,

    /// Maximum number of texts per request
    pub max_texts_per_request: usize,

    /// Character budget per request
    pub max_chars_per_request: usize,

    /// Retries after the first attempt
    pub retry_count: u32,

    /// Base backoff, doubled on each retry
    pub retry_backoff_ms: u64,
}

impl TranslationOptions {
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            max_concurrent_requests: config.optimal_concurrent_requests(),
            max_texts_per_request: config.get_max_texts_per_request(),
            max_chars_per_request: config.get_max_chars_per_request(),
            retry_count: config.common.retry_count,
            retry_backoff_ms: config.common.retry_backoff_ms,
        }
    }
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self::from_config(&TranslationConfig::default())
    }
}

/// Main translation service
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Translation options
    pub options: TranslationOptions,

    /// Translation cache for storing and retrieving translations
    pub cache: TranslationCache,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let endpoint = config.get_endpoint();
        let api_key = config.get_api_key();
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            ConfigTranslationProvider::Backend => {
                url::Url::parse(&endpoint)
                    .map_err(|e| anyhow!("Invalid backend endpoint '{}': {}", endpoint, e))?;
                TranslationProviderImpl::Backend {
                    client: Backend::new(endpoint, api_key, timeout_secs),
                }
            }
            ConfigTranslationProvider::LibreTranslate => {
                url::Url::parse(&endpoint)
                    .map_err(|e| anyhow!("Invalid LibreTranslate endpoint '{}': {}", endpoint, e))?;
                TranslationProviderImpl::LibreTranslate {
                    client: LibreTranslate::new(endpoint, api_key, timeout_secs),
                }
            }
            ConfigTranslationProvider::Mock => TranslationProviderImpl::Mock {
                client: MockProvider::working(),
            },
        };

        Ok(Self::from_parts(provider, config))
    }

    /// Create a service backed by the given mock, ignoring the configured provider
    pub fn with_mock(config: TranslationConfig, client: MockProvider) -> Self {
        Self::from_parts(TranslationProviderImpl::Mock { client }, config)
    }

    fn from_parts(provider: TranslationProviderImpl, config: TranslationConfig) -> Self {
        Self {
            provider,
            options: TranslationOptions::from_config(&config),
            cache: TranslationCache::new(config.common.cache_enabled),
            config,
        }
    }

    /// Name of the provider in use
    pub fn provider_name(&self) -> &'static str {
        match self.provider {
            TranslationProviderImpl::Backend { .. } => "Backend",
            TranslationProviderImpl::LibreTranslate { .. } => "LibreTranslate",
            TranslationProviderImpl::Mock { .. } => "Mock",
        }
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Backend { client } => client.test_connection().await,
            TranslationProviderImpl::LibreTranslate { client } => client.test_connection().await,
            TranslationProviderImpl::Mock { client } => client.test_connection().await,
        }
    }

    /// Languages offered by the provider
    pub async fn supported_languages(&self) -> Result<Vec<LanguageInfo>, ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Backend { client } => client.supported_languages().await,
            TranslationProviderImpl::LibreTranslate { client } => client.supported_languages().await,
            TranslationProviderImpl::Mock { client } => client.supported_languages().await,
        }
    }

    async fn request(&self, texts: &[String], source_language: &str, target_language: &str) -> Result<Vec<String>, ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Backend { client } => {
                request_texts(client, texts, source_language, target_language).await
            }
            TranslationProviderImpl::LibreTranslate { client } => {
                request_texts(client, texts, source_language, target_language).await
            }
            TranslationProviderImpl::Mock { client } => {
                request_texts(client, texts, source_language, target_language).await
            }
        }
    }

    /// Send one batch, retrying transient provider failures with exponential backoff
    ///
    /// The response must hold exactly one text per input; anything else is a
    /// `CardinalityMismatch` and is not retried.
    pub async fn translate_batch_with_retry(
        &self,
        batch_index: usize,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, TranslationError> {
        let max_attempts = self.options.retry_count + 1;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.request(texts, source_language, target_language).await {
                Ok(translated) => {
                    if translated.len() != texts.len() {
                        error!(
                            "Batch {}: provider returned {} texts for {} inputs",
                            batch_index + 1,
                            translated.len(),
                            texts.len()
                        );
                        return Err(TranslationError::CardinalityMismatch {
                            expected: texts.len(),
                            actual: translated.len(),
                        });
                    }
                    return Ok(translated);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let backoff_ms = self.options.retry_backoff_ms * (1u64 << (attempt - 1).min(16));
                    warn!(
                        "Batch {}: {} - attempt {}/{}, retrying in {}ms",
                        batch_index + 1,
                        e,
                        attempt,
                        max_attempts,
                        backoff_ms
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
                Err(e) => {
                    error!("Batch {}: {} - attempt {}/{}", batch_index + 1, e, attempt, max_attempts);
                    return Err(e.into());
                }
            }
        }
    }

    /// Translate an ordered list of texts
    ///
    /// Returns exactly one string per input, in input order. Blank inputs come
    /// back as empty strings without reaching the provider; cached texts are
    /// answered from the cache.
    pub async fn translate_texts(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, TranslationError> {
        let source = language_utils::normalize_to_part1_or_part2t(source_language)
            .map_err(|_| TranslationError::InvalidLanguage(source_language.to_string()))?;
        let target = language_utils::normalize_to_part1_or_part2t(target_language)
            .map_err(|_| TranslationError::InvalidLanguage(target_language.to_string()))?;

        let mut results: Vec<Option<String>> = vec![None; texts.len()];
        let mut pending = Vec::new();

        for (position, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                results[position] = Some(String::new());
            } else if let Some(cached) = self.cache.get(text, &source, &target) {
                results[position] = Some(cached);
            } else {
                pending.push((position, text.clone()));
            }
        }

        if !pending.is_empty() {
            let batches = plan_batches(
                pending,
                self.options.max_texts_per_request,
                self.options.max_chars_per_request,
            );
            debug!(
                "Translating {} of {} texts in {} batches via {} ({} -> {})",
                batches.iter().map(|b| b.items.len()).sum::<usize>(),
                texts.len(),
                batches.len(),
                self.provider_name(),
                source,
                target
            );

            let translated = BatchTranslator::new(self)
                .translate_batches(batches, &source, &target)
                .await?;

            for (position, translation) in translated {
                self.cache.store(&texts[position], &source, &target, &translation);
                results[position] = Some(translation);
            }
        }

        let expected = texts.len();
        let translated: Vec<String> = results.into_iter().flatten().collect();
        if translated.len() != expected {
            return Err(TranslationError::CardinalityMismatch {
                expected,
                actual: translated.len(),
            });
        }
        Ok(translated)
    }
}
