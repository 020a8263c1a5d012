use comrak::nodes::{AstNode, NodeValue, TableAlignment};
use comrak::{format_commonmark, Arena, Options};
use log::debug;

use crate::errors::PipelineError;

use super::model::{AlignmentRecord, TextFragment};
use super::options::MarkdownOptions;
use super::walk;

/// Write `translated` back into the fragment nodes and serialize the tree
///
/// The i-th translated string replaces the i-th fragment. Lengths must match
/// exactly; on mismatch the tree is left untouched. When alignment restoring is
/// enabled, the i-th table gets the i-th present record back before the text is
/// swapped in.
pub fn reinsert<'a, S: AsRef<str>>(
    tree: &'a AstNode<'a>,
    alignments: &[AlignmentRecord],
    translated: &[S],
    fragments: &[TextFragment<'a>],
    options: &MarkdownOptions,
) -> Result<String, PipelineError> {
    check_lengths(fragments.len(), translated.len())?;

    restore_alignments(tree, alignments, options);
    for (fragment, value) in fragments.iter().zip(translated) {
        set_text(fragment.node, value.as_ref());
    }

    serialize(tree, options)
}

/// Like [`reinsert`], but `None` entries keep the fragment's original text
pub fn reinsert_or_original<'a>(
    tree: &'a AstNode<'a>,
    alignments: &[AlignmentRecord],
    translated: &[Option<String>],
    fragments: &[TextFragment<'a>],
    options: &MarkdownOptions,
) -> Result<String, PipelineError> {
    check_lengths(fragments.len(), translated.len())?;

    restore_alignments(tree, alignments, options);
    let mut kept = 0usize;
    for (fragment, value) in fragments.iter().zip(translated) {
        match value {
            Some(value) => set_text(fragment.node, value),
            None => {
                kept += 1;
                set_text(fragment.node, &fragment.value);
            }
        }
    }
    if kept > 0 {
        debug!("Kept original text for {} of {} fragments", kept, fragments.len());
    }

    serialize(tree, options)
}

/// Serialize a tree with the same extensions it was parsed with
pub fn serialize<'a>(tree: &'a AstNode<'a>, options: &MarkdownOptions) -> Result<String, PipelineError> {
    let mut comrak_options = Options::default();
    options.apply(&mut comrak_options);

    let mut buffer = Vec::new();
    format_commonmark(tree, &comrak_options, &mut buffer)
        .map_err(|e| PipelineError::Serialization(e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| PipelineError::Serialization(e.to_string()))
}

/// Parse and re-serialize without touching anything
///
/// This is what an identity translation produces, which makes it the reference
/// output for round-trip checks.
pub fn normalize(markdown: &str, options: &MarkdownOptions) -> Result<String, PipelineError> {
    let arena = Arena::new();
    let tree = super::extract::parse(&arena, markdown, options)?;
    serialize(tree, options)
}

fn check_lengths(expected: usize, actual: usize) -> Result<(), PipelineError> {
    if expected != actual {
        return Err(PipelineError::StructuralMismatch { expected, actual });
    }
    Ok(())
}

fn set_text<'a>(node: &'a AstNode<'a>, value: &str) {
    node.data.borrow_mut().value = NodeValue::Text(value.to_string());
}

fn restore_alignments<'a>(tree: &'a AstNode<'a>, alignments: &[AlignmentRecord], options: &MarkdownOptions) {
    if !options.restore_table_alignments {
        return;
    }

    for (table, record) in walk::tables(tree).zip(alignments) {
        let Some(record) = record else {
            continue;
        };
        if let NodeValue::Table(ref mut node_table) = table.data.borrow_mut().value {
            node_table.alignments = record.iter().copied().map(TableAlignment::from).collect();
        }
    }
}
