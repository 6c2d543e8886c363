//! Re-splitting a node's markdown after a text edit.
//!
//! Text edits on structured nodes are applied to the node's markdown form
//! and the result is parsed again, so typing `# ` at the start of a
//! paragraph turns it into a heading and typing `\n- ` starts a list item.

use std::ops::Range as ByteRange;

use log::debug;

use crate::editing::{Document, RenderHints};
use crate::parsing::parse_blocks;
use crate::tree::node::fill_at;
use crate::tree::{
    NodeKind, SyntaxNode, TreeCursor, locate_markdown_offset, markdown_offset, node_markdown,
};

/// Replace the node at `path` with the blocks parsed from `markdown`.
///
/// The first parsed block takes over the old node's id and spacing, the rest
/// are inserted after it. The cursor lands on markdown offset `md_cursor`.
pub(crate) fn splice_markdown(
    doc: &mut Document,
    path: &[usize],
    markdown: &str,
    md_cursor: usize,
    hints: &mut RenderHints,
) -> Option<()> {
    let (index, parent) = path.split_last()?;
    let old = doc.node(path)?;
    let (old_id, old_blank, old_line) = (old.id(), old.blank_lines, old.start_line);

    let mut nodes = replacement_nodes(markdown);
    let located = locate_markdown_offset(&nodes, md_cursor);

    let mut first = nodes.remove(0);
    let first_id = first.id();
    let first_blank = first.blank_lines;
    let first_fill = std::mem::take(&mut first.blank_fill);
    let mut adopted = doc.node(path)?.adopt(first);
    let mut fill = std::mem::take(&mut adopted.blank_fill);
    fill.resize(old_blank, String::new());
    fill.extend(first_fill);
    let adopted = adopted
        .with_blank_lines(old_blank + first_blank)
        .with_blank_fill(fill);
    if adopted.kind != doc.node(path)?.kind {
        debug!("{old_id} became {} after edit", adopted.type_name());
    }
    nodes.insert(0, adopted);
    for node in &mut nodes {
        node.offset_lines(old_line);
    }

    hints.update(old_id);
    for node in &nodes[1..] {
        hints.add(node.id());
    }
    if nodes.len() > 1 {
        debug!("edit split {old_id} into {} blocks", nodes.len());
    }

    let list = doc.tree.list_mut(parent)?;
    list.splice(*index..=*index, nodes);

    let cursor = match located {
        Some((id, offset)) if id == first_id => TreeCursor::new(old_id, offset),
        Some((id, offset)) => TreeCursor::new(id, offset),
        None => TreeCursor::new(old_id, 0),
    };
    doc.tree.place_cursor(cursor);
    Some(())
}

/// Parsed blocks for `markdown`, never empty. Trailing line breaks become a
/// paragraph so the text after a final newline has a node to live in.
fn replacement_nodes(markdown: &str) -> Vec<SyntaxNode> {
    let blocks = parse_blocks(markdown);
    let trailing = blocks.trailing;
    let mut nodes = blocks.nodes;
    if nodes.is_empty() {
        nodes.push(SyntaxNode::paragraph(fill_at(&trailing.fill, 0)));
    }
    if trailing.breaks > 0 {
        let gap = (1..trailing.breaks)
            .map(|i| fill_at(&trailing.fill, i).to_string())
            .collect();
        let last = SyntaxNode::paragraph(fill_at(&trailing.fill, trailing.breaks))
            .with_blank_lines(trailing.breaks - 1)
            .with_blank_fill(gap);
        nodes.push(last);
    }
    nodes
}

/// Replace `range` of the content of the node at `path` with `text`.
///
/// Code blocks and bare text are spliced verbatim. Other text nodes are
/// re-parsed through their markdown, which may change their kind or split
/// them. Unless `allow_code` is set, an edit that would open a code fence
/// is kept as literal text.
pub(crate) fn edit_text(
    doc: &mut Document,
    path: &[usize],
    range: ByteRange<usize>,
    text: &str,
    allow_code: bool,
    hints: &mut RenderHints,
) -> Option<()> {
    let node = doc.node(path)?;
    if matches!(node.kind, NodeKind::CodeBlock { .. }) || node.kind.is_bare_text() {
        return splice_content(doc, path, range, text, hints);
    }

    let md_text = match node.kind {
        NodeKind::BlockQuote { .. } => text.replace('\n', "\n> "),
        _ => text.to_string(),
    };
    let md = node_markdown(node);
    let md_start = markdown_offset(node, range.start);
    let md_end = markdown_offset(node, range.end);
    let edited = format!("{}{}{}", &md[..md_start], md_text, &md[md_end..]);

    let blocks = parse_blocks(&edited);
    let keeps_literal = match blocks.nodes.first() {
        None => true,
        Some(first) => {
            !allow_code
                && matches!(first.kind, NodeKind::CodeBlock { .. })
                && !matches!(node.kind, NodeKind::CodeBlock { .. })
        }
    };
    if keeps_literal {
        return splice_content(doc, path, range, text, hints);
    }
    splice_markdown(doc, path, &edited, md_start + md_text.len(), hints)
}

/// Replace bytes of a node's content without re-parsing.
pub(crate) fn splice_content(
    doc: &mut Document,
    path: &[usize],
    range: ByteRange<usize>,
    text: &str,
    hints: &mut RenderHints,
) -> Option<()> {
    let node = doc.tree.node_at_mut(path)?;
    node.content.replace_range(range.clone(), text);
    let id = node.id();
    hints.update(id);
    doc.tree.place_cursor(TreeCursor::new(id, range.start + text.len()));
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edit(markdown: &str, range: ByteRange<usize>, text: &str) -> (Document, RenderHints) {
        let mut doc = Document::new(markdown);
        let mut hints = RenderHints::default();
        edit_text(&mut doc, &[0], range, text, false, &mut hints).expect("edit");
        (doc, hints)
    }

    #[test]
    fn promotion_keeps_identity() {
        let mut doc = Document::new("#");
        let id = doc.tree().children[0].id();
        let mut hints = RenderHints::default();
        edit_text(&mut doc, &[0], 1..1, " ", false, &mut hints).expect("edit");
        let node = &doc.tree().children[0];
        assert_eq!(node.id(), id);
        assert_eq!(node.type_name(), "heading1");
        assert_eq!(node.content, "");
        assert_eq!(hints.updated, vec![node.id()]);
        assert_eq!(doc.cursor(), Some(TreeCursor::new(node.id(), 0)));
    }

    #[test]
    fn demotion_moves_cursor_with_text() {
        // "## ab" minus one hash, cursor stays in front of "a"
        let mut doc = Document::new("## ab");
        let mut hints = RenderHints::default();
        let md = node_markdown(&doc.tree().children[0]);
        splice_markdown(&mut doc, &[0], &md[1..], 2, &mut hints).expect("splice");
        let node = &doc.tree().children[0];
        assert_eq!(node.type_name(), "heading1");
        assert_eq!(doc.cursor(), Some(TreeCursor::new(node.id(), 0)));
    }

    #[test]
    fn multi_line_edit_splits_into_siblings() {
        let (doc, hints) = edit("intro", 5..5, "\n- item");
        let kinds: Vec<_> = doc.tree().children.iter().map(SyntaxNode::type_name).collect();
        assert_eq!(kinds, vec!["paragraph", "list-item"]);
        assert_eq!(doc.to_markdown(), "intro\n- item");
        let item = doc.tree().children[1].id();
        assert_eq!(hints.added, vec![item]);
        assert_eq!(doc.cursor(), Some(TreeCursor::new(item, 4)));
    }

    #[test]
    fn trailing_newline_leaves_empty_paragraph() {
        let mut doc = Document::new("a");
        let mut hints = RenderHints::default();
        edit_text(&mut doc, &[0], 1..1, "\n", true, &mut hints).expect("edit");
        assert_eq!(doc.tree().children.len(), 2);
        assert_eq!(doc.to_markdown(), "a\n");
        let empty = doc.tree().children[1].id();
        assert_eq!(doc.cursor(), Some(TreeCursor::new(empty, 0)));
    }

    #[test]
    fn fence_text_stays_literal() {
        let (doc, _) = edit("``", 2..2, "`");
        assert_eq!(doc.tree().children[0].type_name(), "paragraph");
        assert_eq!(doc.tree().children[0].content, "```");
    }

    #[test]
    fn whitespace_only_paragraph_keeps_its_text() {
        let mut doc = Document::new("x");
        doc.tree.children[0].content.clear();
        let mut hints = RenderHints::default();
        edit_text(&mut doc, &[0], 0..0, " ", false, &mut hints).expect("edit");
        assert_eq!(doc.tree().children.len(), 1);
        assert_eq!(doc.tree().children[0].content, " ");
    }

    #[test]
    fn spacing_before_node_is_kept() {
        let (doc, _) = edit("a\n\n\nb", 1..1, "c");
        assert_eq!(doc.to_markdown(), "ac\n\n\nb");
        assert_eq!(doc.tree().children[1].blank_lines, 2);
    }

    #[test]
    fn whitespace_lines_survive_a_split() {
        let (doc, _) = edit("ab", 1..1, "\n  \n");
        assert_eq!(doc.to_markdown(), "a\n  \nb");
        assert_eq!(doc.tree().children[1].blank_fill, vec!["  ".to_string()]);
    }

    #[test]
    fn tight_quote_keeps_its_spelling() {
        let (doc, _) = edit(">a", 1..1, "b");
        assert_eq!(doc.to_markdown(), ">ab");
    }

    #[test]
    fn blockquote_newline_continues_quote() {
        let (doc, _) = edit("> a", 1..1, "\nb");
        assert_eq!(doc.tree().children.len(), 1);
        assert_eq!(doc.tree().children[0].content, "a\nb");
        assert_eq!(doc.to_markdown(), "> a\n> b");
    }
}
