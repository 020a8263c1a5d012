/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Prefixes every text with the target language
 * - `MockProvider::identity()` - Returns the texts unchanged
 * - `MockProvider::uppercase()` - Uppercases every text
 * - `MockProvider::drop_last()` - Loses the last text of every request
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{LanguageInfo, Provider};

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The texts to translate
    pub texts: Vec<String>,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The translated texts
    pub texts: Vec<String>,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with `[target] text`
    Working,
    /// Returns the input unchanged
    Identity,
    /// Returns the input uppercased
    Uppercase,
    /// Returns one text fewer than it was sent
    DropLast,
    /// Returns one text more than it was sent
    ExtraText,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Rejects the credentials
    Unauthorized,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Number of texts received, shared between clones
    text_count: Arc<AtomicUsize>,
    /// Custom per-text translation (optional)
    custom_response: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            text_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    pub fn drop_last() -> Self {
        Self::new(MockBehavior::DropLast)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Set a custom per-text translation, used by `Working`
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of texts received so far, across all requests
    pub fn text_count(&self) -> usize {
        self.text_count.load(Ordering::SeqCst)
    }

    fn translate_one(&self, text: &str, target_language: &str) -> String {
        match self.custom_response {
            Some(generator) => generator(text),
            None => format!("[{}] {}", target_language, text),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            text_count: Arc::clone(&self.text_count),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    fn make_request(&self, texts: &[String], source_language: &str, target_language: &str) -> Self::Request {
        MockRequest {
            texts: texts.to_vec(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.text_count.fetch_add(request.texts.len(), Ordering::SeqCst);

        let texts = match self.behavior {
            MockBehavior::Working => request.texts.iter()
                .map(|t| self.translate_one(t, &request.target_language))
                .collect(),

            MockBehavior::Identity => request.texts,

            MockBehavior::Uppercase => request.texts.iter().map(|t| t.to_uppercase()).collect(),

            MockBehavior::DropLast => {
                let mut texts = request.texts;
                texts.pop();
                texts
            }

            MockBehavior::ExtraText => {
                let mut texts = request.texts;
                texts.push("unexpected".to_string());
                texts
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    return Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    });
                }
                request.texts.iter()
                    .map(|t| self.translate_one(t, &request.target_language))
                    .collect()
            }

            MockBehavior::Failing => {
                return Err(ProviderError::ApiError {
                    message: "Simulated provider failure".to_string(),
                    status_code: 500,
                });
            }

            MockBehavior::Unauthorized => {
                return Err(ProviderError::AuthenticationError("Simulated invalid token".to_string()));
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                request.texts.iter()
                    .map(|t| self.translate_one(t, &request.target_language))
                    .collect()
            }
        };

        Ok(MockResponse { texts })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated outage".to_string())),
            MockBehavior::Unauthorized => Err(ProviderError::AuthenticationError("Simulated invalid token".to_string())),
            _ => Ok(()),
        }
    }

    async fn supported_languages(&self) -> Result<Vec<LanguageInfo>, ProviderError> {
        self.test_connection().await?;
        let codes = ["en", "es", "fr", "de", "pt"];
        Ok(codes.iter()
            .map(|code| LanguageInfo {
                code: code.to_string(),
                name: crate::language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string()),
                targets: codes.iter().filter(|c| *c != code).map(|c| c.to_string()).collect(),
            })
            .collect())
    }

    fn extract_texts(response: &Self::Response) -> Vec<String> {
        response.texts.clone()
    }
}
