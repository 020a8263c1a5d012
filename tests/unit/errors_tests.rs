/*!
 * Tests for error types
 */

use mdtranslate::errors::{AppError, PipelineError, PipelineErrorKind, ProviderError, TranslationError};

#[test]
fn test_pipelineError_kind_shouldMatchVariant() {
    assert_eq!(PipelineError::Parse("x".into()).kind(), PipelineErrorKind::Parse);
    assert_eq!(
        PipelineError::StructuralMismatch { expected: 3, actual: 2 }.kind(),
        PipelineErrorKind::StructuralMismatch
    );
    assert_eq!(PipelineError::Serialization("x".into()).kind(), PipelineErrorKind::Serialization);
}

#[test]
fn test_pipelineError_display_shouldCarryCounts() {
    let err = PipelineError::StructuralMismatch { expected: 3, actual: 2 };
    assert_eq!(
        err.to_string(),
        "Structural mismatch: expected 3 translated fragments, got 2"
    );
}

#[test]
fn test_providerError_isRetryable_shouldOnlyCoverTransientFailures() {
    assert!(ProviderError::ConnectionError("reset".into()).is_retryable());
    assert!(ProviderError::RequestFailed("boom".into()).is_retryable());
    assert!(ProviderError::RateLimitExceeded("slow down".into()).is_retryable());
    assert!(ProviderError::ApiError { status_code: 502, message: "bad gateway".into() }.is_retryable());

    assert!(!ProviderError::ApiError { status_code: 400, message: "bad request".into() }.is_retryable());
    assert!(!ProviderError::AuthenticationError("no".into()).is_retryable());
    assert!(!ProviderError::ParseError("garbage".into()).is_retryable());
}

#[test]
fn test_translationError_fromPipeline_shouldWrap() {
    let err: TranslationError = PipelineError::Parse("too big".into()).into();
    assert!(matches!(err, TranslationError::Pipeline(PipelineError::Parse(_))));
    assert_eq!(err.to_string(), "Pipeline error: Markdown parse error: too big");
}

#[test]
fn test_translationError_fromProvider_shouldWrap() {
    let err: TranslationError = ProviderError::AuthenticationError("bad token".into()).into();
    assert_eq!(err.to_string(), "Provider error: Authentication error: bad token");
}

#[test]
fn test_appError_fromIo_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.md");
    let err: AppError = io.into();
    assert!(matches!(err, AppError::File(message) if message.contains("missing.md")));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let err: AppError = anyhow::anyhow!("something odd").into();
    assert_eq!(err.to_string(), "Unknown error: something odd");
}
