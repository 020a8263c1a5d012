/*!
 * Tests for provider implementations
 */

use mdtranslate::errors::ProviderError;
use mdtranslate::providers::backend::{parse_translation_body, Backend};
use mdtranslate::providers::libretranslate::LibreTranslate;
use mdtranslate::providers::mock::{MockBehavior, MockProvider};
use mdtranslate::providers::{LanguageInfo, Provider};

fn texts(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// Nothing listens on the discard port
const UNREACHABLE: &str = "http://127.0.0.1:9";

#[test]
fn test_backendRequest_shouldSerializeAsQSourceTarget() {
    let backend = Backend::new("http://localhost:3000/api/translate/", "", 5);
    let request = backend.make_request(&texts(&["Hola", "mundo"]), "es", "en");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({ "q": ["Hola", "mundo"], "source": "es", "target": "en" }));
}

#[test]
fn test_backendResponse_shouldReadTranslatedTexts() {
    let response = parse_translation_body(r#"{"translatedTexts":["Hello","world"]}"#).unwrap();
    assert_eq!(Backend::extract_texts(&response), vec!["Hello", "world"]);
}

#[test]
fn test_backendResponse_withWrongShape_shouldBeParseError() {
    assert!(matches!(
        parse_translation_body(r#"{"translatedText":"Hello"}"#),
        Err(ProviderError::ParseError(_))
    ));
    assert!(matches!(parse_translation_body("not json"), Err(ProviderError::ParseError(_))));
}

#[test]
fn test_libreTranslateRequest_withKey_shouldIncludeKeyAndTextFormat() {
    let client = LibreTranslate::new("http://localhost:5000", "secret", 5);
    let request = client.make_request(&texts(&["Hola"]), "es", "en");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["format"], "text");
    assert_eq!(json["api_key"], "secret");
    assert_eq!(json["q"], serde_json::json!(["Hola"]));
}

#[test]
fn test_languageInfo_withoutTargets_shouldDefaultToEmpty() {
    let info: LanguageInfo = serde_json::from_str(r#"{"code":"es","name":"Spanish"}"#).unwrap();
    assert!(info.targets.is_empty());
}

#[tokio::test]
async fn test_backend_withUnreachableServer_shouldReportRetryableError() {
    let backend = Backend::new(UNREACHABLE, "", 2);
    let request = backend.make_request(&texts(&["Hola"]), "es", "en");

    let err = backend.complete(request).await.unwrap_err();
    assert!(err.is_retryable(), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_libreTranslate_withUnreachableServer_shouldFailConnectionTest() {
    let client = LibreTranslate::new(UNREACHABLE, "", 2);
    assert!(client.test_connection().await.is_err());
}

#[tokio::test]
async fn test_mockProvider_slow_shouldStillAnswer() {
    let provider = MockProvider::new(MockBehavior::Slow { delay_ms: 5 });
    let request = provider.make_request(&texts(&["Hola"]), "es", "fr");
    let response = provider.complete(request).await.unwrap();
    assert_eq!(MockProvider::extract_texts(&response), vec!["[fr] Hola"]);
}

#[tokio::test]
async fn test_mockProvider_uppercase_shouldUppercaseEachText() {
    let provider = MockProvider::uppercase();
    let request = provider.make_request(&texts(&["hola", "año"]), "es", "en");
    let response = provider.complete(request).await.unwrap();
    assert_eq!(response.texts, vec!["HOLA", "AÑO"]);
}

#[tokio::test]
async fn test_mockProvider_unauthorized_shouldFailConnectionTest() {
    let provider = MockProvider::new(MockBehavior::Unauthorized);
    assert!(matches!(
        provider.test_connection().await,
        Err(ProviderError::AuthenticationError(_))
    ));
}

#[test]
fn test_mockProvider_identity_shouldEchoTexts() {
    let provider = MockProvider::identity();
    let request = provider.make_request(&texts(&["uno", "dos"]), "es", "en");

    let response = tokio_test::block_on(provider.complete(request)).unwrap();

    assert_eq!(response.texts, vec!["uno", "dos"]);
    assert_eq!(provider.request_count(), 1);
}
