use log::debug;

use crate::editing::{Document, RenderHints};
use crate::tree::{NodeKind, TreeCursor, floor_char_boundary};

/// Delete the active selection and collapse the cursor onto its start.
///
/// Within one node the selected bytes are cut out. Across nodes the first
/// node keeps the text before the selection followed by the last node's
/// text after it, and every node after the first is removed.
pub(crate) fn delete_range(doc: &mut Document, hints: &mut RenderHints) -> Option<()> {
    let selection = doc.active_selection()?;
    let start_path = doc.tree.path_of(selection.start_node_id)?;
    let end_path = doc.tree.path_of(selection.end_node_id)?;
    let (start_index, parent) = start_path.split_last()?;
    let (end_index, end_parent) = end_path.split_last()?;
    if parent != end_parent || start_index > end_index {
        debug!("selection no longer spans one sibling list, ignoring");
        return None;
    }

    if start_index == end_index {
        let node = doc.tree.node_at_mut(&start_path)?;
        let start = floor_char_boundary(&node.content, selection.start_offset);
        let end = floor_char_boundary(&node.content, selection.end_offset);
        if !node.kind.is_text() || start >= end {
            return None;
        }
        node.cut_content(start..end);
        let id = node.id();
        hints.update(id);
        doc.tree.place_cursor(TreeCursor::new(id, start));
        doc.selection = None;
        return Some(());
    }

    let list = doc.tree.list_mut(parent)?;
    let last = &list[*end_index];
    let tail = if last.kind.is_text() {
        let end = floor_char_boundary(&last.content, selection.end_offset);
        last.content[end..].to_string()
    } else {
        String::new()
    };

    let removed: Vec<_> = list.drain(start_index + 1..=*end_index).collect();
    let first = &mut list[*start_index];
    let start = if first.kind.is_text() {
        floor_char_boundary(&first.content, selection.start_offset)
    } else {
        debug!("range starts on {} {}, replacing with paragraph", first.type_name(), first.id());
        first.kind = NodeKind::paragraph();
        first.content.clear();
        first.children.clear();
        0
    };
    let len = first.content.len();
    first.cut_content(start..len);
    first.content.push_str(&tail);
    let first_id = first.id();

    debug!("range delete merged {} nodes into {first_id}", removed.len() + 1);
    hints.update(first_id);
    for node in &removed {
        for gone in node.descendants() {
            hints.remove(gone.id());
        }
    }
    doc.tree.place_cursor(TreeCursor::new(first_id, start));
    doc.selection = None;
    Some(())
}
