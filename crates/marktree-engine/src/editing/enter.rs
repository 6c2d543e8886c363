use log::debug;

use crate::editing::reparse::splice_content;
use crate::editing::{Document, RenderHints, range};
use crate::parsing::blocks::kinds::CodeFence;
use crate::tree::{
    CellAddress, ListAttrs, ListMarker, NodeKind, SyntaxNode, TableGrid, TreeCursor,
    floor_char_boundary,
};

/// Split the node under the cursor, or do what Enter means for its kind.
pub(crate) fn enter(doc: &mut Document, hints: &mut RenderHints) -> Option<()> {
    let deleted = if doc.active_selection().is_some() {
        range::delete_range(doc, hints)
    } else {
        None
    };
    enter_at_cursor(doc, hints).or(deleted)
}

fn enter_at_cursor(doc: &mut Document, hints: &mut RenderHints) -> Option<()> {
    let (cursor, path) = doc.current()?;
    if let Some(cell) = cursor.cell {
        return next_row(doc, &path, cell, hints);
    }
    if cursor.tag_part.is_some() {
        return None;
    }

    let node = doc.node(&path)?;
    let at = floor_char_boundary(&node.content, cursor.offset);
    match &node.kind {
        NodeKind::CodeBlock { .. } => splice_content(doc, &path, at..at, "\n", hints),
        NodeKind::Paragraph { bare_text: true } => None,
        NodeKind::ListItem(attrs) if node.content.is_empty() => {
            debug!("enter on empty item at indent {} leaves the list", attrs.indent());
            doc.demote_to_paragraph(&path, hints)
        }
        NodeKind::ListItem(attrs) => {
            let attrs = attrs.clone();
            continue_list(doc, &path, attrs, at, hints)
        }
        NodeKind::Paragraph { .. } if CodeFence::fence_line(&node.content).is_some() => {
            open_code_block(doc, &path, hints)
        }
        kind if kind.is_text() => split_block(doc, &path, at, hints),
        _ => paragraph_after(doc, &path, hints),
    }
}

/// Move to the same column of the next row, adding a row at the bottom.
fn next_row(
    doc: &mut Document,
    path: &[usize],
    cell: CellAddress,
    hints: &mut RenderHints,
) -> Option<()> {
    let node = doc.tree.node_at_mut(path)?;
    let id = node.id();
    let grid = TableGrid::parse(&node.content);
    let row = cell.row + 1;
    if row >= grid.row_count() {
        debug!("adding row {row} to table {id}");
        node.content.push('\n');
        node.content.push_str(&TableGrid::empty_row(grid.col_count()));
        hints.update(id);
    }
    let grid = TableGrid::parse(&node.content);
    let cells = grid.rows.get(row)?;
    let col = cell.col.min(cells.len().saturating_sub(1));
    let offset = cells.get(col).map_or(0, |c| c.text.len());
    doc.tree.place_cursor(TreeCursor::in_cell(id, row, col, offset));
    Some(())
}

/// Turn a paragraph holding only a fence line into an empty code block.
fn open_code_block(doc: &mut Document, path: &[usize], hints: &mut RenderHints) -> Option<()> {
    let node = doc.tree.node_at_mut(path)?;
    let open = CodeFence::fence_line(&node.content)?;
    debug!("{} becomes a {}-tick code block", node.id(), open.count);
    node.kind = NodeKind::CodeBlock {
        language: open.language,
        fence_count: open.count,
        closed: true,
        blank_body: false,
    };
    node.content.clear();
    let id = node.id();
    hints.update(id);
    doc.tree.place_cursor(TreeCursor::new(id, 0));
    Some(())
}

/// Split a list item into two and renumber the ordered run after it.
fn continue_list(
    doc: &mut Document,
    path: &[usize],
    attrs: ListAttrs,
    at: usize,
    hints: &mut RenderHints,
) -> Option<()> {
    let (index, parent) = path.split_last()?;
    let list = doc.tree.list_mut(parent)?;
    let current = &mut list[*index];
    let after = current.content.split_off(at);
    let end_line = current.end_line;
    hints.update(current.id());

    let marker = match attrs.marker {
        ListMarker::Number(n) => ListMarker::Number(n + 1),
        bullet => bullet,
    };
    let item = SyntaxNode::new(
        NodeKind::ListItem(ListAttrs {
            marker,
            spaces: attrs.spaces,
            checkbox: attrs.checkbox.map(|_| ' '),
        }),
        after,
    )
    .with_lines(end_line + 1, end_line + 1);
    let item_id = item.id();
    hints.add(item_id);
    list.insert(index + 1, item);

    if let ListMarker::Number(n) = marker {
        renumber(&mut list[index + 2..], attrs.indent(), n, hints);
    }
    doc.tree.place_cursor(TreeCursor::new(item_id, 0));
    Some(())
}

/// Give the ordered items at `indent` following an item numbered `last`
/// consecutive numbers. Deeper items are skipped; anything else ends the run.
fn renumber(rest: &mut [SyntaxNode], indent: usize, mut last: u64, hints: &mut RenderHints) {
    for node in rest {
        let id = node.id();
        let NodeKind::ListItem(attrs) = &mut node.kind else {
            break;
        };
        if attrs.indent() > indent {
            continue;
        }
        if attrs.indent() < indent || !attrs.ordered() {
            break;
        }
        last += 1;
        if attrs.marker != ListMarker::Number(last) {
            attrs.marker = ListMarker::Number(last);
            hints.update(id);
        }
    }
}

/// Split a text block at `at`. The text after the cursor becomes a new
/// paragraph as written, without being parsed for block openers.
fn split_block(
    doc: &mut Document,
    path: &[usize],
    at: usize,
    hints: &mut RenderHints,
) -> Option<()> {
    let (index, parent) = path.split_last()?;
    let list = doc.tree.list_mut(parent)?;
    let current = &mut list[*index];
    let after = current.content[at..].to_string();
    let len = current.content.len();
    current.cut_content(at..len);
    let end_line = current.end_line;
    hints.update(current.id());
    debug!("split {} at {at}", current.id());

    let paragraph = SyntaxNode::paragraph(after)
        .with_blank_lines(1)
        .with_lines(end_line + 1, end_line + 1);
    let id = paragraph.id();
    hints.add(id);
    list.insert(index + 1, paragraph);
    doc.tree.place_cursor(TreeCursor::new(id, 0));
    Some(())
}

/// Enter on a node without text adds an empty paragraph after it.
fn paragraph_after(doc: &mut Document, path: &[usize], hints: &mut RenderHints) -> Option<()> {
    let (index, parent) = path.split_last()?;
    let list = doc.tree.list_mut(parent)?;
    let end_line = list[*index].end_line;
    let paragraph = SyntaxNode::paragraph("")
        .with_blank_lines(1)
        .with_lines(end_line + 1, end_line + 1);
    let id = paragraph.id();
    hints.add(id);
    list.insert(index + 1, paragraph);
    doc.tree.place_cursor(TreeCursor::new(id, 0));
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Cmd;
    use pretty_assertions::assert_eq;

    fn enter_at(markdown: &str, index: usize, offset: usize) -> Document {
        let mut doc = Document::new(markdown);
        let id = doc.tree().children[index].id();
        doc.set_cursor(TreeCursor::new(id, offset)).expect("cursor");
        doc.apply(Cmd::Enter).expect("patch");
        doc
    }

    #[test]
    fn paragraph_splits_in_two() {
        let doc = enter_at("hello world", 0, 5);
        assert_eq!(doc.to_markdown(), "hello\n\n world");
        let second = doc.tree().children[1].id();
        assert_eq!(doc.cursor(), Some(TreeCursor::new(second, 0)));
    }

    #[test]
    fn heading_keeps_first_half() {
        let doc = enter_at("## Title text", 0, 5);
        let kinds: Vec<_> = doc.tree().children.iter().map(|n| n.type_name()).collect();
        assert_eq!(kinds, vec!["heading2", "paragraph"]);
        assert_eq!(doc.to_markdown(), "## Title\n\n text");
    }

    #[test]
    fn list_item_continues_and_renumbers() {
        let mut doc = Document::new("1. one\n2. two\n\n3. three");
        let first = doc.tree().children[0].id();
        doc.set_cursor(TreeCursor::new(first, 3)).expect("cursor");
        let patch = doc.apply(Cmd::Enter).expect("patch");
        assert_eq!(doc.to_markdown(), "1. one\n2. \n3. two\n\n4. three");
        let added = doc.tree().children[1].id();
        assert_eq!(patch.hints.added, vec![added]);
        assert_eq!(patch.cursor, Some(TreeCursor::new(added, 0)));
    }

    #[test]
    fn checkbox_item_continues_unchecked() {
        let doc = enter_at("- [x] done", 0, 4);
        assert_eq!(doc.to_markdown(), "- [x] done\n- [ ] ");
    }

    #[test]
    fn renumber_skips_nested_items() {
        let doc = enter_at("1. a\n   \n2. b\n  - x\n3. c", 0, 1);
        assert_eq!(doc.to_markdown(), "1. a\n2. \n   \n3. b\n  - x\n4. c");
    }

    #[test]
    fn empty_item_leaves_the_list() {
        let doc = enter_at("- a\n- ", 1, 0);
        assert_eq!(doc.tree().children[1].type_name(), "paragraph");
        assert_eq!(doc.to_markdown(), "- a\n");
    }

    #[test]
    fn code_block_takes_newline() {
        let doc = enter_at("```\nab\n```", 0, 1);
        assert_eq!(doc.to_markdown(), "```\na\nb\n```");
        assert_eq!(doc.cursor().map(|c| c.offset), Some(2));
    }

    #[test]
    fn fence_line_opens_code_block() {
        // a fence typed into a paragraph stays literal until Enter
        let mut doc = Document::new("x");
        doc.tree.children[0].content = "````rust".into();
        let id = doc.tree().children[0].id();
        doc.set_cursor(TreeCursor::new(id, 8)).expect("cursor");
        doc.apply(Cmd::Enter).expect("patch");
        let node = &doc.tree().children[0];
        assert_eq!(
            node.kind,
            NodeKind::CodeBlock {
                language: "rust".into(),
                fence_count: 4,
                closed: true,
                blank_body: false,
            }
        );
        assert_eq!(doc.to_markdown(), "````rust\n````");
    }

    #[test]
    fn table_cell_moves_down_then_adds_row() {
        let mut doc = Document::new("| a | b |\n|---|---|\n| c | d |");
        let id = doc.tree().children[0].id();
        doc.set_cursor(TreeCursor::in_cell(id, 0, 1, 0)).expect("cursor");
        doc.apply(Cmd::Enter).expect("patch");
        assert_eq!(doc.cursor(), Some(TreeCursor::in_cell(id, 1, 1, 1)));
        let patch = doc.apply(Cmd::Enter).expect("patch");
        assert_eq!(patch.hints.updated, vec![id]);
        assert_eq!(doc.to_markdown(), "| a | b |\n|---|---|\n| c | d |\n|  |  |");
        assert_eq!(doc.cursor(), Some(TreeCursor::in_cell(id, 2, 1, 0)));
    }

    #[test]
    fn rule_gets_paragraph_after() {
        let doc = enter_at("---", 0, 0);
        assert_eq!(doc.to_markdown(), "---\n\n");
        assert_eq!(doc.tree().children[1].type_name(), "paragraph");
    }

    #[test]
    fn split_text_stays_a_paragraph() {
        let doc = enter_at("intro# not a heading", 0, 5);
        let kinds: Vec<_> = doc.tree().children.iter().map(|n| n.type_name()).collect();
        assert_eq!(kinds, vec!["paragraph", "paragraph"]);
        assert_eq!(doc.tree().children[1].content, "# not a heading");
        assert_eq!(doc.to_markdown(), "intro\n\n# not a heading");
    }

    #[test]
    fn split_keeps_line_breaks_where_the_cursor_was() {
        let doc = enter_at("a\nb", 0, 2);
        assert_eq!(doc.tree().children[0].content, "a\n");
        assert_eq!(doc.tree().children[1].content, "b");
    }

    #[test]
    fn continued_item_keeps_literal_indent_and_mark() {
        let doc = enter_at("   - [X] done", 0, 4);
        assert_eq!(doc.to_markdown(), "   - [X] done\n   - [ ] ");
    }
}
