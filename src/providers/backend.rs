use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{read_body, send_error, LanguageInfo, Provider};

const SERVICE: &str = "Translation backend";

/// Client for the article translation backend
///
/// `POST {endpoint}` translates, `GET {endpoint}/languages` lists languages.
/// The API key, when set, is sent as a bearer token.
pub struct Backend {
    /// HTTP client for API requests
    client: Client,
    /// Translation URL
    endpoint: String,
    /// Bearer token
    api_key: String,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Translation request body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BackendRequest {
    /// Texts to translate, always an array
    pub q: Vec<String>,
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
}

/// Translation response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendResponse {
    pub translated_texts: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LanguagesResponse {
    success: bool,
    list: Vec<LanguageInfo>,
}

impl Backend {
    /// Create a new backend client
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.api_key)
        }
    }
}

/// Parse a success body, insisting on `translatedTexts` being an array of strings
pub fn parse_translation_body(body: &str) -> Result<BackendResponse, ProviderError> {
    serde_json::from_str::<BackendResponse>(body).map_err(|e| {
        ProviderError::ParseError(format!(
            "expected {{\"translatedTexts\": [string]}} from backend: {}",
            e
        ))
    })
}

#[async_trait]
impl Provider for Backend {
    type Request = BackendRequest;
    type Response = BackendResponse;

    fn make_request(&self, texts: &[String], source_language: &str, target_language: &str) -> Self::Request {
        BackendRequest {
            q: texts.to_vec(),
            source: source_language.to_string(),
            target: target_language.to_string(),
        }
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let response = self.authorized(self.client.post(&self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let body = read_body(SERVICE, response).await?;
        parse_translation_body(&body)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.supported_languages().await.map(|_| ())
    }

    async fn supported_languages(&self) -> Result<Vec<LanguageInfo>, ProviderError> {
        let url = format!("{}/languages", self.endpoint);
        let response = self.authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let body = read_body(SERVICE, response).await?;
        let languages: LanguagesResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(format!("unexpected languages response: {}", e)))?;

        if !languages.success {
            return Err(ProviderError::ParseError(
                "backend reported success=false for languages".to_string(),
            ));
        }
        Ok(languages.list)
    }

    fn extract_texts(response: &Self::Response) -> Vec<String> {
        response.translated_texts.clone()
    }
}
