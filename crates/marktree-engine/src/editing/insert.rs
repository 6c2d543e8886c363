use log::debug;

use crate::editing::addressed::{splice_cell, splice_tag};
use crate::editing::reparse::{edit_text, splice_content};
use crate::editing::{Document, RenderHints, range};
use crate::tree::{NodeKind, floor_char_boundary};

/// Insert `text` at the cursor, replacing the active selection first.
pub(crate) fn insert_text(doc: &mut Document, text: &str, hints: &mut RenderHints) -> Option<()> {
    if text.is_empty() {
        return None;
    }
    let deleted = if doc.active_selection().is_some() {
        range::delete_range(doc, hints)
    } else {
        None
    };
    insert_at_cursor(doc, text, hints).or(deleted)
}

fn insert_at_cursor(doc: &mut Document, text: &str, hints: &mut RenderHints) -> Option<()> {
    let (cursor, path) = doc.current()?;

    if let Some(cell) = cursor.cell {
        return splice_cell(doc, &path, cell, cursor.offset..cursor.offset, text, hints);
    }
    if let Some(part) = cursor.tag_part {
        return splice_tag(doc, &path, part, cursor.offset..cursor.offset, text, hints);
    }

    let node = doc.node(&path)?;
    let at = floor_char_boundary(&node.content, cursor.offset);
    match &node.kind {
        NodeKind::Image(_)
        | NodeKind::HorizontalRule
        | NodeKind::Table
        | NodeKind::HtmlBlock(_) => {
            debug!("{} {} takes no text input", node.type_name(), node.id());
            None
        }
        NodeKind::Paragraph { bare_text: true } => {
            let text = text.replace(['\n', '\r'], " ");
            splice_content(doc, &path, at..at, &text, hints)
        }
        _ => edit_text(doc, &path, at..at, text, text.contains('\n'), hints),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Cmd, EditorOptions};
    use crate::tree::{Range, TagPart, TreeCursor};
    use pretty_assertions::assert_eq;

    fn doc_at(markdown: &str, index: usize, offset: usize) -> Document {
        let mut doc = Document::new(markdown);
        let id = doc.tree().children[index].id();
        doc.set_cursor(TreeCursor::new(id, offset)).expect("cursor");
        doc
    }

    fn insert(doc: &mut Document, text: &str) -> Option<crate::editing::Patch> {
        doc.apply(Cmd::InsertText { text: text.into() })
    }

    #[test]
    fn hash_space_promotes_to_heading() {
        let mut doc = doc_at("#", 0, 1);
        let id = doc.tree().children[0].id();
        let patch = insert(&mut doc, " ").expect("patch");
        let node = &doc.tree().children[0];
        assert_eq!(node.type_name(), "heading1");
        assert_eq!(node.content, "");
        assert_eq!(patch.cursor, Some(TreeCursor::new(id, 0)));
        assert_eq!(patch.hints.updated, vec![id]);
    }

    #[test]
    fn dash_space_promotes_to_list_item() {
        let mut doc = doc_at("-task", 0, 1);
        insert(&mut doc, " ").expect("patch");
        let node = &doc.tree().children[0];
        assert_eq!(node.type_name(), "list-item");
        assert_eq!(node.content, "task");
        assert_eq!(doc.cursor().map(|c| c.offset), Some(0));
    }

    #[test]
    fn typing_keeps_heading() {
        let mut doc = doc_at("## Ti", 0, 2);
        insert(&mut doc, "tle").expect("patch");
        assert_eq!(doc.to_markdown(), "## Title");
        assert_eq!(doc.cursor().map(|c| c.offset), Some(5));
    }

    #[test]
    fn code_block_is_verbatim() {
        let mut doc = doc_at("```\nlet a;\n```", 0, 6);
        insert(&mut doc, "\n# not a heading").expect("patch");
        assert_eq!(doc.tree().children.len(), 1);
        assert_eq!(doc.to_markdown(), "```\nlet a;\n# not a heading\n```");
    }

    #[test]
    fn pasted_lines_become_blocks() {
        let mut doc = doc_at("start", 0, 5);
        let patch = insert(&mut doc, "\n\n- one\n- two").expect("patch");
        let kinds: Vec<_> = doc.tree().children.iter().map(|n| n.type_name()).collect();
        assert_eq!(kinds, vec!["paragraph", "list-item", "list-item"]);
        assert_eq!(patch.hints.added.len(), 2);
        assert_eq!(doc.to_markdown(), "start\n\n- one\n- two");
    }

    #[test]
    fn selection_is_replaced() {
        let mut doc = Document::new("hello world");
        let id = doc.tree().children[0].id();
        doc.set_selection(Range::new(id, 0, id, 5)).expect("selection");
        insert(&mut doc, "goodbye").expect("patch");
        assert_eq!(doc.to_markdown(), "goodbye world");
        assert_eq!(doc.selection(), None);
    }

    #[test]
    fn structural_nodes_take_no_text() {
        let mut doc = doc_at("---\n\n![a](b.png)", 0, 0);
        assert_eq!(insert(&mut doc, "x"), None);
        let mut doc = doc_at("---\n\n![a](b.png)", 1, 0);
        assert_eq!(insert(&mut doc, "x"), None);
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn bare_text_stays_one_line() {
        let mut doc = Document::new("<p>hi</p>");
        let child = doc.tree().children[0].children[0].id();
        doc.set_cursor(TreeCursor::new(child, 2)).expect("cursor");
        insert(&mut doc, "\nthere").expect("patch");
        assert_eq!(doc.to_markdown(), "<p>hi there</p>");
    }

    #[test]
    fn table_cell_insert() {
        let mut doc = Document::new("| a | b |\n|---|---|");
        let id = doc.tree().children[0].id();
        doc.set_cursor(TreeCursor::in_cell(id, 0, 0, 1)).expect("cursor");
        insert(&mut doc, "bc").expect("patch");
        assert_eq!(doc.to_markdown(), "| abc | b |\n|---|---|");
        assert_eq!(doc.cursor(), Some(TreeCursor::in_cell(id, 0, 0, 3)));
    }

    #[test]
    fn tag_insert_in_source_mode() {
        let mut doc = Document::new("<section>\n\nx\n\n</section>")
            .with_options(EditorOptions { source_mode: true });
        let id = doc.tree().children[0].id();
        doc.set_cursor(TreeCursor::in_tag(id, TagPart::Opening, 8))
            .expect("cursor");
        insert(&mut doc, " class=\"a\"").expect("patch");
        assert_eq!(doc.to_markdown(), "<section class=\"a\">\n\nx\n\n</section>");
    }
}
