/*!
 * Translation of Markdown articles.
 *
 * - `core`: provider dispatch, retries and the order-preserving `translate_texts`
 * - `batch`: request planning and concurrent batch execution
 * - `cache`: per-fragment translation cache
 * - `workflow`: extract → translate → reinsert for whole articles
 */

// Re-export main types for easier usage
pub use self::batch::BatchTranslator;
pub use self::core::{TranslationOptions, TranslationService};
pub use self::workflow::{Article, ArticleTranslator, TranslatedArticle};

// Submodules
pub mod batch;
pub mod cache;
pub mod core;
pub mod workflow;
