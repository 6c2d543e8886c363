use log::debug;

use crate::editing::Document;
use crate::tree::{NodeKind, Range, SyntaxNode};

/// Highest select-all level: the whole document.
const DOCUMENT_LEVEL: u8 = 3;

/// Advance the select-all cycle by one step.
///
/// Level 1 covers the cursor's node, level 2 its content group and level 3
/// the whole document. Without a content group the cycle skips from 1 to 3.
/// The cursor stays where it is.
pub(crate) fn select_all(doc: &mut Document) -> Option<()> {
    let (_, path) = doc.current()?;
    let (index, parent) = path.split_last()?;

    let mut level = if doc.select_level >= DOCUMENT_LEVEL {
        1
    } else {
        doc.select_level + 1
    };
    let mut range = None;
    if level == 1 {
        range = doc.node(&path).map(|node| span(std::slice::from_ref(node)));
    }
    if level == 2 {
        range = doc
            .tree
            .list(parent)
            .and_then(|siblings| content_group(siblings, *index, !parent.is_empty()))
            .map(span);
        if range.is_none() {
            level = DOCUMENT_LEVEL;
        }
    }
    if level == DOCUMENT_LEVEL {
        if doc.tree.children.is_empty() {
            return None;
        }
        range = Some(span(&doc.tree.children));
    }

    debug!("select-all level {level}");
    doc.selection = range;
    doc.select_level = level;
    Some(())
}

/// The group a node belongs to: every child of an html container, or the
/// run of list items around a list item.
fn content_group(
    siblings: &[SyntaxNode],
    index: usize,
    in_container: bool,
) -> Option<&[SyntaxNode]> {
    if in_container {
        return Some(siblings);
    }
    let NodeKind::ListItem(attrs) = &siblings.get(index)?.kind else {
        return None;
    };
    let in_run = |node: &SyntaxNode| match &node.kind {
        NodeKind::ListItem(other) => other.indent() >= attrs.indent(),
        _ => false,
    };
    let start = siblings[..index]
        .iter()
        .rposition(|node| !in_run(node))
        .map_or(0, |i| i + 1);
    let end = siblings[index..]
        .iter()
        .position(|node| !in_run(node))
        .map_or(siblings.len(), |i| index + i);
    Some(&siblings[start..end])
}

/// Range from the start of the first node to the end of the last.
fn span(nodes: &[SyntaxNode]) -> Range {
    let first = &nodes[0];
    let last = &nodes[nodes.len() - 1];
    Range::new(first.id(), 0, last.id(), last.content.len())
}
