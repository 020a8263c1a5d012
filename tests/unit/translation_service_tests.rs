/*!
 * Tests for the translation service
 */

use mdtranslate::app_config::{TranslationConfig, TranslationProvider};
use mdtranslate::errors::{ProviderError, TranslationError};
use mdtranslate::providers::mock::{MockBehavior, MockProvider};
use mdtranslate::translation::batch::plan_batches;
use mdtranslate::translation::cache::TranslationCache;
use mdtranslate::translation::{TranslationOptions, TranslationService};

use crate::common;

fn texts(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn mock_index(config: &TranslationConfig) -> usize {
    config.available_providers.iter()
        .position(|p| p.provider_type == "mock")
        .expect("mock provider config")
}

#[test]
fn test_translationService_new_withMockProvider_shouldSucceed() {
    let service = TranslationService::new(common::mock_translation_config()).unwrap();
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_translationService_new_withInvalidEndpoint_shouldFail() {
    let mut config = TranslationConfig::default();
    config.provider = TranslationProvider::LibreTranslate;
    config.available_providers[1].endpoint = "::not a url::".to_string();
    assert!(TranslationService::new(config).is_err());
}

#[test]
fn test_translationOptions_fromConfig_shouldFollowActiveProvider() {
    let mut config = common::mock_translation_config();
    let index = mock_index(&config);
    config.available_providers[index].concurrent_requests = 9;
    config.available_providers[index].max_texts_per_request = 3;
    config.common.retry_count = 5;

    let options = TranslationOptions::from_config(&config);
    assert_eq!(options.max_concurrent_requests, 9);
    assert_eq!(options.max_texts_per_request, 3);
    assert_eq!(options.retry_count, 5);
}

#[tokio::test]
async fn test_translateTexts_shouldPreserveOrderAndLength() {
    let service = TranslationService::with_mock(common::mock_translation_config(), MockProvider::working());
    let input = texts(&["Título", "Primer párrafo.", "Segundo."]);

    let result = service.translate_texts(&input, "es", "en").await.unwrap();

    assert_eq!(result, vec!["[en] Título", "[en] Primer párrafo.", "[en] Segundo."]);
}

#[tokio::test]
async fn test_translateTexts_withSmallBatches_shouldSplitRequests() {
    let mut config = common::mock_translation_config();
    let index = mock_index(&config);
    config.available_providers[index].max_texts_per_request = 2;
    let mock = MockProvider::identity();
    let service = TranslationService::with_mock(config, mock.clone());

    let input = texts(&["a", "b", "c", "d", "e"]);
    let result = service.translate_texts(&input, "es", "en").await.unwrap();

    assert_eq!(result, input);
    assert_eq!(mock.request_count(), 3);
    assert_eq!(mock.text_count(), 5);
}

#[tokio::test]
async fn test_translateTexts_withDuplicates_shouldHitCacheOnSecondCall() {
    let mock = MockProvider::working();
    let service = TranslationService::with_mock(common::mock_translation_config(), mock.clone());

    service.translate_texts(&texts(&["uno", "dos"]), "es", "en").await.unwrap();
    let result = service.translate_texts(&texts(&["dos", "tres"]), "es", "en").await.unwrap();

    assert_eq!(result, vec!["[en] dos", "[en] tres"]);
    assert_eq!(mock.text_count(), 3);
    let (hits, _, _) = service.cache.stats();
    assert_eq!(hits, 1);
}

#[tokio::test]
async fn test_translateTexts_withCacheDisabled_shouldAlwaysAskProvider() {
    let mut config = common::mock_translation_config();
    config.common.cache_enabled = false;
    let mock = MockProvider::working();
    let service = TranslationService::with_mock(config, mock.clone());

    service.translate_texts(&texts(&["uno"]), "es", "en").await.unwrap();
    service.translate_texts(&texts(&["uno"]), "es", "en").await.unwrap();

    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn test_translateTexts_withExtraText_shouldReportMismatch() {
    let service = TranslationService::with_mock(
        common::mock_translation_config(),
        MockProvider::new(MockBehavior::ExtraText),
    );

    let result = service.translate_texts(&texts(&["a", "b"]), "es", "en").await;

    assert!(matches!(
        result,
        Err(TranslationError::CardinalityMismatch { expected: 2, actual: 3 })
    ));
}

#[tokio::test]
async fn test_translateTexts_withMismatch_shouldNotRetry() {
    let mock = MockProvider::drop_last();
    let service = TranslationService::with_mock(common::mock_translation_config(), mock.clone());

    let result = service.translate_texts(&texts(&["a", "b"]), "es", "en").await;

    assert!(result.is_err());
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_translateTexts_withTransientFailure_shouldRecover() {
    // Every second request fails: first succeeds, second fails and is retried
    let mock = MockProvider::intermittent(2);
    let service = TranslationService::with_mock(common::mock_translation_config(), mock.clone());

    service.translate_texts(&texts(&["uno"]), "es", "en").await.unwrap();
    let result = service.translate_texts(&texts(&["dos"]), "es", "en").await.unwrap();

    assert_eq!(result, vec!["[en] dos"]);
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn test_translateTexts_withPersistentFailure_shouldGiveUpAfterRetries() {
    let mut config = common::mock_translation_config();
    config.common.retry_count = 2;
    let mock = MockProvider::failing();
    let service = TranslationService::with_mock(config, mock.clone());

    let result = service.translate_texts(&texts(&["uno"]), "es", "en").await;

    assert!(matches!(
        result,
        Err(TranslationError::Provider(ProviderError::ApiError { status_code: 500, .. }))
    ));
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn test_translateTexts_withEmptyList_shouldReturnEmpty() {
    let mock = MockProvider::failing();
    let service = TranslationService::with_mock(common::mock_translation_config(), mock.clone());

    let result = service.translate_texts(&[], "es", "en").await.unwrap();

    assert!(result.is_empty());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_testConnection_withFailingMock_shouldFail() {
    let service = TranslationService::with_mock(common::mock_translation_config(), MockProvider::failing());
    assert!(matches!(
        service.test_connection().await,
        Err(ProviderError::ConnectionError(_))
    ));
}

#[tokio::test]
async fn test_supportedLanguages_withMock_shouldListFive() {
    let service = TranslationService::with_mock(common::mock_translation_config(), MockProvider::working());
    let languages = service.supported_languages().await.unwrap();
    assert_eq!(languages.len(), 5);
    assert!(languages.iter().any(|l| l.code == "pt" && l.name == "Portuguese"));
}

#[test]
fn test_planBatches_shouldKeepPositions() {
    let items: Vec<(usize, String)> = vec![(0, "aa".into()), (3, "bb".into()), (7, "cc".into())];
    let batches = plan_batches(items, 2, 100);

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].items.iter().map(|(p, _)| *p).collect::<Vec<_>>(), vec![0, 3]);
    assert_eq!(batches[1].items, vec![(7, "cc".to_string())]);
    assert_eq!(batches[1].index, 1);
    assert_eq!(batches[0].char_count(), 4);
}

#[test]
fn test_translationCache_clear_shouldResetStats() {
    let cache = TranslationCache::new(true);
    cache.store("uno", "es", "en", "one");
    assert_eq!(cache.get("uno", "es", "en").as_deref(), Some("one"));
    assert_eq!(cache.len(), 1);

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats(), (0, 0, 0.0));
}
