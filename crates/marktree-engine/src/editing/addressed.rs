//! Edits through table-cell and html-tag cursors.
//!
//! These cursors carry an offset into a cell's text or into an opening or
//! closing tag rather than into the node's content, and edits through them
//! never re-parse the node.

use std::ops::Range as ByteRange;

use log::debug;

use crate::editing::{Document, RenderHints};
use crate::parsing::blocks::kinds::HtmlBlock;
use crate::tree::{CellAddress, NodeKind, TableGrid, TagPart, TreeCursor, floor_char_boundary};

/// Replace `range` of a cell's text. Pipes are escaped and line breaks
/// become spaces so the edit stays inside the cell.
pub(crate) fn splice_cell(
    doc: &mut Document,
    path: &[usize],
    cell: CellAddress,
    range: ByteRange<usize>,
    text: &str,
    hints: &mut RenderHints,
) -> Option<()> {
    let node = doc.tree.node_at_mut(path)?;
    if node.kind != NodeKind::Table {
        return None;
    }
    let grid = TableGrid::parse(&node.content);
    let target = grid.cell(cell.row, cell.col)?;
    let start = floor_char_boundary(&target.text, range.start);
    let end = floor_char_boundary(&target.text, range.end);
    let text = text.replace('|', "\\|").replace(['\n', '\r'], " ");
    node.content.replace_range(
        target.range.start + start..target.range.start + end,
        &text,
    );

    let offset = TableGrid::parse(&node.content)
        .cell(cell.row, cell.col)
        .map_or(0, |c| floor_char_boundary(&c.text, start + text.len()));
    let id = node.id();
    hints.update(id);
    doc.tree
        .place_cursor(TreeCursor::in_cell(id, cell.row, cell.col, offset));
    Some(())
}

/// Replace `range` of an html block's opening or closing tag. Only allowed
/// in source mode.
pub(crate) fn splice_tag(
    doc: &mut Document,
    path: &[usize],
    part: TagPart,
    range: ByteRange<usize>,
    text: &str,
    hints: &mut RenderHints,
) -> Option<()> {
    if !doc.options.source_mode {
        debug!("tag text is read-only outside source mode");
        return None;
    }
    let node = doc.tree.node_at_mut(path)?;
    let NodeKind::HtmlBlock(html) = &mut node.kind else {
        return None;
    };
    let tag = match part {
        TagPart::Opening => &mut html.opening_tag,
        TagPart::Closing => &mut html.closing_tag,
    };
    let start = floor_char_boundary(tag, range.start);
    let end = floor_char_boundary(tag, range.end);
    let text = text.replace(['\n', '\r'], " ");
    tag.replace_range(start..end, &text);
    if part == TagPart::Opening {
        if let Some(name) = HtmlBlock::tag_name(&html.opening_tag) {
            html.tag_name = name;
        }
    }

    let id = node.id();
    hints.update(id);
    doc.tree
        .place_cursor(TreeCursor::in_tag(id, part, start + text.len()));
    Some(())
}

/// Text a tag cursor points into, for finding character boundaries.
pub(crate) fn tag_text(doc: &Document, path: &[usize], part: TagPart) -> Option<String> {
    match &doc.node(path)?.kind {
        NodeKind::HtmlBlock(html) => Some(match part {
            TagPart::Opening => html.opening_tag.clone(),
            TagPart::Closing => html.closing_tag.clone(),
        }),
        _ => None,
    }
}

/// Text a cell cursor points into.
pub(crate) fn cell_text(doc: &Document, path: &[usize], cell: CellAddress) -> Option<String> {
    let node = doc.node(path)?;
    TableGrid::parse(&node.content)
        .cell(cell.row, cell.col)
        .map(|c| c.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::EditorOptions;
    use pretty_assertions::assert_eq;

    const TABLE: &str = "| a | b |\n|---|---|\n| c | d |";

    #[test]
    fn cell_edit_stays_in_cell() {
        let mut doc = Document::new(TABLE);
        let id = doc.tree().children[0].id();
        let cell = CellAddress { row: 1, col: 1 };
        let mut hints = RenderHints::default();
        splice_cell(&mut doc, &[0], cell, 1..1, "x|y\nz", &mut hints).expect("edit");
        assert_eq!(doc.to_markdown(), "| a | b |\n|---|---|\n| c | dx\\|y z |");
        assert_eq!(cell_text(&doc, &[0], cell).as_deref(), Some("dx\\|y z"));
        assert_eq!(doc.cursor(), Some(TreeCursor::in_cell(id, 1, 1, 7)));
        assert_eq!(hints.updated, vec![id]);
    }

    #[test]
    fn missing_cell_is_a_no_op() {
        let mut doc = Document::new(TABLE);
        let mut hints = RenderHints::default();
        let cell = CellAddress { row: 5, col: 0 };
        assert_eq!(splice_cell(&mut doc, &[0], cell, 0..0, "x", &mut hints), None);
        assert_eq!(doc.to_markdown(), TABLE);
    }

    #[test]
    fn tag_edit_needs_source_mode() {
        let markdown = "<div>\n\ntext\n\n</div>";
        let mut doc = Document::new(markdown);
        let mut hints = RenderHints::default();
        assert_eq!(
            splice_tag(&mut doc, &[0], TagPart::Opening, 4..4, " id=\"a\"", &mut hints),
            None
        );

        let mut doc = Document::new(markdown).with_options(EditorOptions { source_mode: true });
        splice_tag(&mut doc, &[0], TagPart::Opening, 4..4, " id=\"a\"", &mut hints)
            .expect("edit");
        assert_eq!(doc.to_markdown(), "<div id=\"a\">\n\ntext\n\n</div>");
        assert_eq!(
            tag_text(&doc, &[0], TagPart::Opening).as_deref(),
            Some("<div id=\"a\">")
        );
        assert_eq!(tag_text(&doc, &[0], TagPart::Closing).as_deref(), Some("</div>"));
    }
}
