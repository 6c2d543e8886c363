//! Backspace and Delete.
//!
//! Inside text one character goes. At a node edge the node merges with its
//! neighbour when both are plain text blocks; table cell edges, container
//! edges and code blocks stop the deletion instead.

use log::debug;

use crate::editing::addressed::{cell_text, splice_cell, splice_tag, tag_text};
use crate::editing::reparse::edit_text;
use crate::editing::{Document, RenderHints, range};
use crate::tree::{NodeKind, SyntaxNode, TreeCursor, floor_char_boundary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

pub(crate) fn backspace(doc: &mut Document, hints: &mut RenderHints) -> Option<()> {
    delete(doc, Direction::Backward, hints)
}

pub(crate) fn delete_forward(doc: &mut Document, hints: &mut RenderHints) -> Option<()> {
    delete(doc, Direction::Forward, hints)
}

fn delete(doc: &mut Document, dir: Direction, hints: &mut RenderHints) -> Option<()> {
    if doc.active_selection().is_some() {
        return range::delete_range(doc, hints);
    }
    let (cursor, path) = doc.current()?;

    if let Some(cell) = cursor.cell {
        let text = cell_text(doc, &path, cell)?;
        let span = char_span(&text, cursor.offset, dir)?;
        return splice_cell(doc, &path, cell, span.0..span.1, "", hints);
    }
    if let Some(part) = cursor.tag_part {
        let text = tag_text(doc, &path, part)?;
        let span = char_span(&text, cursor.offset, dir)?;
        return splice_tag(doc, &path, part, span.0..span.1, "", hints);
    }

    let node = doc.node(&path)?;
    if !node.kind.is_text() {
        return remove_node(doc, &path, hints);
    }
    let offset = floor_char_boundary(&node.content, cursor.offset);
    if let Some((start, end)) = char_span(&node.content, offset, dir) {
        return edit_text(doc, &path, start..end, "", false, hints);
    }

    let demotes = dir == Direction::Backward
        && node.content.is_empty()
        && !node.kind.is_paragraph();
    if demotes {
        return doc.demote_to_paragraph(&path, hints);
    }
    match dir {
        Direction::Backward => join_backward(doc, &path, hints),
        Direction::Forward => join_forward(doc, &path, hints),
    }
}

/// Byte span of the character before or after `offset`, if there is one.
fn char_span(text: &str, offset: usize, dir: Direction) -> Option<(usize, usize)> {
    let offset = floor_char_boundary(text, offset);
    match dir {
        Direction::Backward => {
            let (start, _) = text[..offset].char_indices().next_back()?;
            Some((start, offset))
        }
        Direction::Forward => {
            let c = text[offset..].chars().next()?;
            Some((offset, offset + c.len_utf8()))
        }
    }
}

/// Backspace at the start of a text node.
fn join_backward(doc: &mut Document, path: &[usize], hints: &mut RenderHints) -> Option<()> {
    let (index, parent) = path.split_last()?;
    if *index == 0 {
        debug!("backspace at start of sibling list, nothing to join");
        return None;
    }
    let list = doc.tree.list_mut(parent)?;
    let (before, rest) = list.split_at_mut(*index);
    let prev = before.last_mut()?;
    let current = &rest[0];

    if is_atom(prev) {
        debug!("backspace removes {} {}", prev.type_name(), prev.id());
        let removed = list.remove(index - 1);
        hints.remove(removed.id());
        return Some(());
    }
    if prev.kind.is_mergeable() && current.kind.is_mergeable() {
        let at = prev.content.len();
        prev.content.push_str(&current.content);
        let prev_id = prev.id();
        debug!("merging {} into {prev_id}", current.id());
        let removed = list.remove(*index);
        hints.update(prev_id);
        hints.remove(removed.id());
        doc.tree.place_cursor(TreeCursor::new(prev_id, at));
        return Some(());
    }
    if is_empty_paragraph(current) {
        let cursor = end_of(prev);
        let removed = list.remove(*index);
        hints.remove(removed.id());
        doc.tree.place_cursor(cursor);
        return Some(());
    }
    debug!("no join between {} and {}", prev.type_name(), current.type_name());
    None
}

/// Delete at the end of a text node.
fn join_forward(doc: &mut Document, path: &[usize], hints: &mut RenderHints) -> Option<()> {
    let (index, parent) = path.split_last()?;
    let list = doc.tree.list_mut(parent)?;
    if index + 1 >= list.len() {
        debug!("delete at end of sibling list, nothing to join");
        return None;
    }
    let (before, rest) = list.split_at_mut(index + 1);
    let current = before.last_mut()?;
    let next = &rest[0];

    if is_atom(next) {
        debug!("delete removes {} {}", next.type_name(), next.id());
        let removed = list.remove(index + 1);
        hints.remove(removed.id());
        return Some(());
    }
    if current.kind.is_mergeable() && next.kind.is_mergeable() {
        current.content.push_str(&next.content);
        let current_id = current.id();
        debug!("merging {} into {current_id}", next.id());
        let removed = list.remove(index + 1);
        hints.update(current_id);
        hints.remove(removed.id());
        return Some(());
    }
    if is_empty_paragraph(current) {
        let next_id = next.id();
        let removed = list.remove(*index);
        hints.remove(removed.id());
        doc.tree.place_cursor(TreeCursor::new(next_id, 0));
        return Some(());
    }
    debug!("no join between {} and {}", current.type_name(), next.type_name());
    None
}

/// Blocks that a boundary deletion removes whole.
fn is_atom(node: &SyntaxNode) -> bool {
    matches!(node.kind, NodeKind::HorizontalRule | NodeKind::Image(_))
}

fn is_empty_paragraph(node: &SyntaxNode) -> bool {
    node.kind == NodeKind::paragraph() && node.content.is_empty()
}

fn end_of(node: &SyntaxNode) -> TreeCursor {
    let offset = if node.kind.is_text() { node.content.len() } else { 0 };
    TreeCursor::new(node.id(), offset)
}

/// Remove a non-text node under the cursor. An emptied sibling list gets an
/// empty paragraph so the cursor has somewhere to go.
fn remove_node(doc: &mut Document, path: &[usize], hints: &mut RenderHints) -> Option<()> {
    let (index, parent) = path.split_last()?;
    let list = doc.tree.list_mut(parent)?;
    let removed = list.remove(*index);
    debug!("removing {} {}", removed.type_name(), removed.id());
    for node in removed.descendants() {
        hints.remove(node.id());
    }

    let cursor = if *index > 0 {
        end_of(&list[index - 1])
    } else if let Some(next) = list.first() {
        TreeCursor::new(next.id(), 0)
    } else {
        let placeholder = SyntaxNode::paragraph("")
            .with_blank_lines(removed.blank_lines)
            .with_blank_fill(removed.blank_fill.clone())
            .with_lines(removed.start_line, removed.start_line);
        hints.add(placeholder.id());
        let cursor = TreeCursor::new(placeholder.id(), 0);
        list.push(placeholder);
        cursor
    };
    doc.tree.place_cursor(cursor);
    Some(())
}
