/*!
 * Provider implementations for different translation services.
 *
 * Every provider takes an ordered list of texts and must return exactly one
 * translation per input, in the same order:
 * - Backend: the article translation backend (`{ q, source, target }`)
 * - LibreTranslate: self-hosted machine translation server
 * - Mock: deterministic provider for tests and offline runs
 */

use async_trait::async_trait;
use log::error;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Build a request translating `texts` from `source_language` to `target_language`
    fn make_request(&self, texts: &[String], source_language: &str, target_language: &str) -> Self::Request;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Languages the provider can translate between
    async fn supported_languages(&self) -> Result<Vec<LanguageInfo>, ProviderError>;

    /// Extract the translated texts from the provider response
    fn extract_texts(response: &Self::Response) -> Vec<String>;
}

/// A language offered by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// ISO 639-1 code as the provider spells it
    pub code: String,
    /// Human readable name
    pub name: String,
    /// Codes this language can be translated into
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Map a transport failure to a provider error
pub(crate) fn send_error(service: &str, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() || error.is_connect() {
        ProviderError::ConnectionError(format!("{}: {}", service, error))
    } else {
        ProviderError::RequestFailed(format!("{}: {}", service, error))
    }
}

/// Read a response body, turning non-success statuses into provider errors
pub(crate) async fn read_body(service: &str, response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| send_error(service, e))?;

    if !status.is_success() {
        error!("{} error ({}): {}", service, status, body);
        return Err(status_error(status.as_u16(), &body));
    }
    Ok(body)
}

/// Map a non-success HTTP status and its body to a provider error
///
/// Error bodies are either `{ "error": "..." }` or
/// `{ "success": false, "message": "..." }`; anything else is passed through.
pub(crate) fn status_error(status: u16, body: &str) -> ProviderError {
    let message = error_message(body);
    match status {
        401 | 403 => ProviderError::AuthenticationError(message),
        429 => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError {
            status_code: status,
            message,
        },
    }
}

fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return if body.trim().is_empty() {
            "Request failed".to_string()
        } else {
            body.trim().to_string()
        };
    };

    if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
        return error.to_string();
    }
    if value.get("success").and_then(|s| s.as_bool()) == Some(false) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    format!("Unexpected response body: {}", value)
}

pub mod backend;
pub mod libretranslate;
pub mod mock;
