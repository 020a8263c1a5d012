use comrak::nodes::{AstNode, TableAlignment};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PipelineError;

use super::options::MarkdownOptions;

/// A translatable text leaf of the document tree
///
/// `node` is the arena node the value was read from; reinsertion writes the
/// translation back into that node and nowhere else. `value` keeps the leaf
/// verbatim, including leading and trailing spaces next to inline markup.
#[derive(Clone)]
pub struct TextFragment<'a> {
    pub node: &'a AstNode<'a>,
    pub value: String,
}

impl fmt::Debug for TextFragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFragment").field("value", &self.value).finish()
    }
}

/// Column alignment of a GFM table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<TableAlignment> for ColumnAlignment {
    fn from(alignment: TableAlignment) -> Self {
        match alignment {
            TableAlignment::None => Self::None,
            TableAlignment::Left => Self::Left,
            TableAlignment::Center => Self::Center,
            TableAlignment::Right => Self::Right,
        }
    }
}

impl From<ColumnAlignment> for TableAlignment {
    fn from(alignment: ColumnAlignment) -> Self {
        match alignment {
            ColumnAlignment::None => Self::None,
            ColumnAlignment::Left => Self::Left,
            ColumnAlignment::Center => Self::Center,
            ColumnAlignment::Right => Self::Right,
        }
    }
}

/// Alignment snapshot of one table, `None` when the table had no alignment list
pub type AlignmentRecord = Option<Vec<ColumnAlignment>>;

/// Result of extraction: the tree plus everything needed to put it back together
pub struct ExtractedDocument<'a> {
    /// Document root, owned by the caller's arena
    pub tree: &'a AstNode<'a>,

    /// Text fragments in pre-order traversal order
    pub fragments: Vec<TextFragment<'a>>,

    /// One record per table, in traversal order
    pub table_alignments: Vec<AlignmentRecord>,
}

impl<'a> ExtractedDocument<'a> {
    /// Fragment values in order, ready to hand to a translator
    pub fn fragment_values(&self) -> Vec<String> {
        self.fragments.iter().map(|f| f.value.clone()).collect()
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn table_count(&self) -> usize {
        self.table_alignments.len()
    }

    /// Reinsert `translated` into this document's tree and serialize it
    pub fn reinsert<S: AsRef<str>>(
        &self,
        translated: &[S],
        options: &MarkdownOptions,
    ) -> Result<String, PipelineError> {
        super::reinsert::reinsert(
            self.tree,
            &self.table_alignments,
            translated,
            &self.fragments,
            options,
        )
    }
}

impl fmt::Debug for ExtractedDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractedDocument")
            .field("fragments", &self.fragments)
            .field("table_alignments", &self.table_alignments)
            .finish()
    }
}
