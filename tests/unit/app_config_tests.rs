/*!
 * Tests for application configuration functionality
 */

use mdtranslate::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use mdtranslate::bilingual::BilingualFormat;
use mdtranslate::markdown::BulletStyle;

use crate::common;

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "es");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.translation.provider, TranslationProvider::Backend);
    assert_eq!(config.log_level, LogLevel::Info);

    let backend = config.translation.get_provider_config(&TranslationProvider::Backend)
        .expect("Backend provider config should exist");
    assert_eq!(backend.concurrent_requests, 4);
    assert_eq!(backend.max_chars_per_request, 5000);
    assert_eq!(backend.max_texts_per_request, 128);
    assert_eq!(backend.timeout_secs, 30);

    assert_eq!(config.markdown.bullet, BulletStyle::Dash);
    assert!(config.markdown.restore_table_alignments);
    assert_eq!(config.output.format, BilingualFormat::Translated);
    assert_eq!(config.output.summary_text, "Translation");
}

#[test]
fn test_defaultConfig_shouldValidate() {
    assert!(Config::default().validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_configValidation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "es".to_string();

    config.target_language = "".to_string();
    assert!(config.validate().is_err());

    // Same language under two spellings
    config.target_language = "spa".to_string();
    assert!(config.validate().is_err());
    config.target_language = "fr".to_string();
    assert!(config.validate().is_ok());

    config.translation.available_providers[0].endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    // Mock ignores endpoints
    config.translation.provider = TranslationProvider::Mock;
    assert!(config.validate().is_ok());

    config.translation.available_providers[2].max_texts_per_request = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_configValidation_withZeroDocumentLimit_shouldFail() {
    let mut config = Config::default();
    config.markdown.max_document_bytes = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_providerGetters_withEmptyEndpoint_shouldFallBackToDefault() {
    let mut config = common::mock_config();
    config.translation.provider = TranslationProvider::LibreTranslate;
    config.translation.available_providers[1].endpoint = String::new();

    assert_eq!(config.translation.get_endpoint(), "http://localhost:5000");
}

#[test]
fn test_providerGetters_withMissingProviderEntry_shouldUseDefaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();

    assert_eq!(config.translation.optimal_concurrent_requests(), 4);
    assert_eq!(config.translation.get_max_chars_per_request(), 5000);
    assert_eq!(config.translation.get_max_texts_per_request(), 128);
    assert_eq!(config.translation.get_api_key(), "");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:3000/api/translate");
}

#[test]
fn test_providerConfig_new_shouldCarryDefaultEndpoint() {
    let config = ProviderConfig::new(TranslationProvider::LibreTranslate);
    assert_eq!(config.provider_type, "libretranslate");
    assert_eq!(config.endpoint, "http://localhost:5000");
}

#[test]
fn test_translationProvider_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("LibreTranslate".parse::<TranslationProvider>().unwrap(), TranslationProvider::LibreTranslate);
    assert_eq!("MOCK".parse::<TranslationProvider>().unwrap(), TranslationProvider::Mock);
    assert!("ollama".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Backend.to_string(), "backend");
}

#[test]
fn test_configFromJson_withPartialFile_shouldFillDefaults() {
    let json = r#"{
        "source_language": "fr",
        "markdown": { "bullet": "star" },
        "output": { "format": "details" }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.source_language, "fr");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.markdown.bullet, BulletStyle::Star);
    assert!(config.markdown.restore_table_alignments);
    assert_eq!(config.output.format, BilingualFormat::Details);
    assert_eq!(config.output.summary_text, "Translation");
}

#[test]
fn test_configSaveAndLoad_shouldPreserveValues() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "de".to_string();
    config.translation.provider = TranslationProvider::LibreTranslate;
    config.translation.common.retry_count = 7;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.target_language, "de");
    assert_eq!(loaded.translation.provider, TranslationProvider::LibreTranslate);
    assert_eq!(loaded.translation.common.retry_count, 7);
    Ok(())
}

#[test]
fn test_configFromFile_withMalformedJson_shouldFail() -> anyhow::Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_markdownConfig_toOptions_shouldCopyFields() {
    let mut config = Config::default();
    config.markdown.bullet = BulletStyle::Plus;
    config.markdown.restore_table_alignments = false;
    config.markdown.max_document_bytes = 42;

    let options = config.markdown.to_options();
    assert_eq!(options.bullet, BulletStyle::Plus);
    assert!(!options.restore_table_alignments);
    assert_eq!(options.max_document_bytes, 42);
}
