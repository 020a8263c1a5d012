use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, Options};
use log::debug;

use crate::errors::PipelineError;

use super::model::{AlignmentRecord, ColumnAlignment, ExtractedDocument, TextFragment};
use super::options::MarkdownOptions;

/// Parse `markdown` into a tree allocated in `arena`
///
/// comrak accepts any UTF-8 input, so the only rejection is an input above
/// `max_document_bytes`.
pub fn parse<'a>(
    arena: &'a Arena<AstNode<'a>>,
    markdown: &str,
    options: &MarkdownOptions,
) -> Result<&'a AstNode<'a>, PipelineError> {
    if markdown.len() > options.max_document_bytes {
        return Err(PipelineError::Parse(format!(
            "document is {} bytes, limit is {}",
            markdown.len(),
            options.max_document_bytes
        )));
    }

    let mut comrak_options = Options::default();
    options.apply(&mut comrak_options);

    Ok(parse_document(arena, markdown, &comrak_options))
}

/// Parse and collect translatable fragments plus table alignments
pub fn extract<'a>(
    arena: &'a Arena<AstNode<'a>>,
    markdown: &str,
    options: &MarkdownOptions,
) -> Result<ExtractedDocument<'a>, PipelineError> {
    let tree = parse(arena, markdown, options)?;
    Ok(collect(tree))
}

/// Collect fragments and alignments from an already parsed tree
///
/// Single pre-order pass. Code spans and code blocks carry their content as
/// literals, not text children, so they never show up here; neither do URLs,
/// link titles or raw HTML.
pub fn collect<'a>(tree: &'a AstNode<'a>) -> ExtractedDocument<'a> {
    let mut fragments = Vec::new();
    let mut table_alignments: Vec<AlignmentRecord> = Vec::new();

    for node in tree.descendants() {
        match node.data.borrow().value {
            NodeValue::Text(ref text) => {
                if !text.trim().is_empty() {
                    fragments.push(TextFragment {
                        node,
                        value: text.clone(),
                    });
                }
            }
            NodeValue::Table(ref table) => {
                let record = if table.alignments.is_empty() {
                    None
                } else {
                    Some(table.alignments.iter().copied().map(ColumnAlignment::from).collect())
                };
                table_alignments.push(record);
            }
            _ => {}
        }
    }

    debug!(
        "Extracted {} text fragments and {} tables",
        fragments.len(),
        table_alignments.len()
    );

    ExtractedDocument {
        tree,
        fragments,
        table_alignments,
    }
}
