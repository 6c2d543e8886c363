use log::debug;

use crate::editing::{Document, RenderHints};
use crate::tree::{self, InlineFormat, NodeKind, TreeCursor};

/// Toggle `format` over the selection, or the word at the cursor.
///
/// Only markdown text blocks take inline formats; a selection spanning
/// several nodes is left alone.
pub(crate) fn apply_format(
    doc: &mut Document,
    format: &InlineFormat,
    hints: &mut RenderHints,
) -> Option<()> {
    let (cursor, path) = doc.current()?;
    if cursor.cell.is_some() || cursor.tag_part.is_some() {
        return None;
    }
    let (path, start, end) = match doc.active_selection() {
        Some(sel) if !sel.is_single_node() => {
            debug!("format across nodes is not supported");
            return None;
        }
        Some(sel) => (
            doc.tree.path_of(sel.start_node_id)?,
            sel.start_offset,
            sel.end_offset,
        ),
        None => (path, cursor.offset, cursor.offset),
    };

    let node = doc.tree.node_at_mut(&path)?;
    let formattable = node.kind.is_text()
        && !node.kind.is_bare_text()
        && !matches!(node.kind, NodeKind::CodeBlock { .. });
    if !formattable {
        return None;
    }
    let before = node.content.clone();
    let at = tree::apply_format(node, start, end, format);
    if node.content == before {
        return None;
    }

    let id = node.id();
    hints.update(id);
    doc.tree.place_cursor(TreeCursor::new(id, at));
    doc.selection = None;
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Cmd;
    use crate::tree::Range;
    use pretty_assertions::assert_eq;

    fn format(doc: &mut Document, format: InlineFormat) -> Option<crate::editing::Patch> {
        doc.apply(Cmd::ApplyFormat { format })
    }

    #[test]
    fn selection_is_wrapped_then_unwrapped() {
        let mut doc = Document::new("- buy milk");
        let id = doc.tree().children[0].id();
        doc.set_selection(Range::new(id, 4, id, 8)).expect("selection");
        let patch = format(&mut doc, InlineFormat::Bold).expect("patch");
        assert_eq!(doc.to_markdown(), "- buy **milk**");
        assert_eq!(patch.cursor, Some(TreeCursor::new(id, 12)));
        assert_eq!(doc.selection(), None);

        doc.set_selection(Range::new(id, 6, id, 10)).expect("selection");
        format(&mut doc, InlineFormat::Bold).expect("patch");
        assert_eq!(doc.to_markdown(), "- buy milk");
    }

    #[test]
    fn cursor_formats_word() {
        let mut doc = Document::new("# one two");
        let id = doc.tree().children[0].id();
        doc.set_cursor(TreeCursor::new(id, 1)).expect("cursor");
        format(&mut doc, InlineFormat::Code).expect("patch");
        assert_eq!(doc.to_markdown(), "# `one` two");
    }

    #[test]
    fn code_blocks_and_cross_node_selections_are_untouched() {
        let mut doc = Document::new("```\nx\n```\n\na\n\nb");
        let code = doc.tree().children[0].id();
        doc.set_cursor(TreeCursor::new(code, 0)).expect("cursor");
        assert_eq!(format(&mut doc, InlineFormat::Bold), None);

        let (a, b) = (doc.tree().children[1].id(), doc.tree().children[2].id());
        doc.set_selection(Range::new(a, 0, b, 1)).expect("selection");
        assert_eq!(format(&mut doc, InlineFormat::Italic), None);
    }

    #[test]
    fn whitespace_under_cursor_is_a_no_op() {
        let mut doc = Document::new("a  b");
        let id = doc.tree().children[0].id();
        doc.set_cursor(TreeCursor::new(id, 2)).expect("cursor");
        assert_eq!(format(&mut doc, InlineFormat::Bold), None);
    }
}
