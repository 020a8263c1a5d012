/*!
 * Error types for the mdtranslate application.
 *
 * Each layer gets its own thiserror enum: providers report transport and API
 * failures, the Markdown pipeline reports parse/shape/serialization failures,
 * translation wraps both, and `AppError` sits on top for the binary.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether another attempt at the same request could succeed.
    ///
    /// Server-side and network failures are transient; malformed responses,
    /// client errors and rejected credentials are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

/// Machine-checkable category of a [`PipelineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineErrorKind {
    Parse,
    StructuralMismatch,
    Serialization,
}

/// Errors raised by the Markdown extract/reinsert pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The input could not be turned into a document tree
    #[error("Markdown parse error: {0}")]
    Parse(String),

    /// The translated list does not line up with the extracted fragments
    #[error("Structural mismatch: expected {expected} translated fragments, got {actual}")]
    StructuralMismatch {
        /// Number of fragments extracted from the document
        expected: usize,
        /// Number of translated strings supplied
        actual: usize,
    },

    /// The mutated tree could not be written back to Markdown
    #[error("Markdown serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    pub fn kind(&self) -> PipelineErrorKind {
        match self {
            Self::Parse(_) => PipelineErrorKind::Parse,
            Self::StructuralMismatch { .. } => PipelineErrorKind::StructuralMismatch,
            Self::Serialization(_) => PipelineErrorKind::Serialization,
        }
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the Markdown pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// The provider returned a different number of texts than it was sent
    #[error("Translator returned {actual} texts for {expected} inputs")]
    CardinalityMismatch {
        /// Number of texts sent
        expected: usize,
        /// Number of texts received
        actual: usize,
    },

    /// A language code that is neither ISO 639-1 nor ISO 639-2
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the Markdown pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
