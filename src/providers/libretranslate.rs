use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{read_body, send_error, LanguageInfo, Provider};

const SERVICE: &str = "LibreTranslate";

/// LibreTranslate client
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Server base URL
    endpoint: String,
    /// Optional API key, sent in the request body
    api_key: String,
}

impl std::fmt::Debug for LibreTranslate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslate")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// `/translate` request body
#[derive(Debug, Clone, Serialize)]
pub struct LibreTranslateRequest {
    pub q: Vec<String>,
    pub source: String,
    pub target: String,
    /// Always `text`; HTML mode would let the server rewrite markup
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// `/translate` response body when `q` is an array
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibreTranslateResponse {
    pub translated_text: Vec<String>,
}

impl LibreTranslate {
    /// Create a new LibreTranslate client
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
}

#[async_trait]
impl Provider for LibreTranslate {
    type Request = LibreTranslateRequest;
    type Response = LibreTranslateResponse;

    fn make_request(&self, texts: &[String], source_language: &str, target_language: &str) -> Self::Request {
        LibreTranslateRequest {
            q: texts.to_vec(),
            source: source_language.to_string(),
            target: target_language.to_string(),
            format: "text".to_string(),
            api_key: (!self.api_key.is_empty()).then(|| self.api_key.clone()),
        }
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = format!("{}/translate", self.endpoint);
        let response = self.client.post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let body = read_body(SERVICE, response).await?;
        serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(format!("unexpected LibreTranslate response: {}", e)))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.supported_languages().await.map(|_| ())
    }

    async fn supported_languages(&self) -> Result<Vec<LanguageInfo>, ProviderError> {
        let url = format!("{}/languages", self.endpoint);
        let response = self.client.get(&url)
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let body = read_body(SERVICE, response).await?;
        serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(format!("unexpected LibreTranslate languages: {}", e)))
    }

    fn extract_texts(response: &Self::Response) -> Vec<String> {
        response.translated_text.clone()
    }
}
