use comrak::{ListStyleType, Options};
use serde::{Deserialize, Serialize};

/// Marker written in front of bullet list items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletStyle {
    #[default]
    Dash,
    Star,
    Plus,
}

impl From<BulletStyle> for ListStyleType {
    fn from(style: BulletStyle) -> Self {
        match style {
            BulletStyle::Dash => ListStyleType::Dash,
            BulletStyle::Star => ListStyleType::Star,
            BulletStyle::Plus => ListStyleType::Plus,
        }
    }
}

/// Settings shared by extraction and reinsertion
///
/// The same extension set has to be used in both directions, otherwise a
/// table parsed on the way in would be written out as a plain paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub bullet: BulletStyle,
    pub restore_table_alignments: bool,
    pub max_document_bytes: usize,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            bullet: BulletStyle::Dash,
            restore_table_alignments: true,
            max_document_bytes: 1024 * 1024,
        }
    }
}

impl MarkdownOptions {
    /// CommonMark + GFM tables, strikethrough, autolinks, task lists and footnotes
    pub fn apply(&self, options: &mut Options) {
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.render.list_style = self.bullet.into();
    }
}
