/*!
 * Markdown round-trip pipeline.
 *
 * A document is parsed into a comrak arena tree, its translatable text leaves
 * are collected as fragments, and after translation the new strings are written
 * back into the very same leaves before the tree is serialized again:
 *
 * - `model`: fragments, alignment records and the extracted document
 * - `options`: parser/serializer settings shared by both directions
 * - `extract`: parse + collect fragments and table alignments
 * - `reinsert`: length check, alignment restore, substitution, serialization
 *
 * The tree borrows from a caller-owned `comrak::Arena`, so one arena backs
 * exactly one extract/translate/reinsert cycle.
 */

pub use self::extract::{collect, extract, parse};
pub use self::model::{AlignmentRecord, ColumnAlignment, ExtractedDocument, TextFragment};
pub use self::options::{BulletStyle, MarkdownOptions};
pub use self::reinsert::{normalize, reinsert, reinsert_or_original, serialize};

pub mod extract;
pub mod model;
pub mod options;
pub mod reinsert;
mod walk;
