use comrak::nodes::{AstNode, NodeValue};

// Extraction records tables in this order; restoration must walk them the same way.

pub(crate) fn tables<'a>(root: &'a AstNode<'a>) -> impl Iterator<Item = &'a AstNode<'a>> {
    root.descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Table(_)))
}
