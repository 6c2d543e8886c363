//! # Document Tree
//!
//! [`SyntaxTree`] owns the top-level blocks and the single active
//! [`TreeCursor`]. Ownership only flows from parent to child: a node's
//! parent is found by searching from the root, never stored.

pub mod cursor;
pub mod format;
pub mod html;
pub mod node;
pub mod serialize;
pub mod table;

use serde::Serialize;

use crate::error::TreeError;
use crate::parsing::blocks::Blocks;

pub use cursor::{CellAddress, CursorPath, Range, TagPart, TreeCursor};
pub use format::{InlineFormat, apply_format};
pub use html::blocks_html;
pub use node::{
    HtmlAttrs, HtmlShape, ImageAttrs, ListAttrs, ListMarker, NodeId, NodeKind, SyntaxNode,
    Trailing,
};
pub use serialize::{
    bare_text, blocks_markdown, content_offset, floor_char_boundary, list_prefix,
    locate_markdown_offset, markdown_offset, node_markdown,
};
pub use table::{Alignment, TableCell, TableGrid, is_separator_row};

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    pub children: Vec<SyntaxNode>,
    /// Line breaks after the last block.
    pub trailing: Trailing,
    cursor: Option<TreeCursor>,
}

impl SyntaxTree {
    pub fn from_blocks(blocks: Blocks) -> Self {
        SyntaxTree {
            children: blocks.nodes,
            trailing: blocks.trailing,
            cursor: None,
        }
    }

    pub fn cursor(&self) -> Option<TreeCursor> {
        self.cursor
    }

    /// Place the cursor after checking that it addresses something real.
    pub fn set_cursor(&mut self, cursor: TreeCursor) -> Result<(), TreeError> {
        self.validate(&cursor)?;
        self.cursor = Some(cursor);
        Ok(())
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Unchecked placement for edit operations that just computed the position.
    pub(crate) fn place_cursor(&mut self, cursor: TreeCursor) {
        self.cursor = Some(cursor);
    }

    fn validate(&self, cursor: &TreeCursor) -> Result<(), TreeError> {
        let node = self
            .find(cursor.node_id)
            .ok_or(TreeError::UnknownNode(cursor.node_id))?;
        let invalid_offset = TreeError::InvalidOffset {
            node: cursor.node_id,
            offset: cursor.offset,
        };
        let text: &str = match (cursor.tag_part, cursor.cell, &node.kind) {
            (Some(part), None, NodeKind::HtmlBlock(html)) => match part {
                TagPart::Opening => &html.opening_tag,
                TagPart::Closing => &html.closing_tag,
            },
            (Some(_), _, _) => {
                return Err(TreeError::InvalidAddress {
                    node: cursor.node_id,
                    what: "tag part",
                });
            }
            (None, Some(cell), NodeKind::Table) => {
                let grid = TableGrid::parse(&node.content);
                let Some(found) = grid.cell(cell.row, cell.col) else {
                    return Err(TreeError::InvalidAddress {
                        node: cursor.node_id,
                        what: "table cell",
                    });
                };
                return if cursor.offset <= found.text.len()
                    && found.text.is_char_boundary(cursor.offset)
                {
                    Ok(())
                } else {
                    Err(invalid_offset)
                };
            }
            (None, Some(_), _) => {
                return Err(TreeError::InvalidAddress {
                    node: cursor.node_id,
                    what: "table cell",
                });
            }
            (None, None, _) => &node.content,
        };
        if cursor.offset <= text.len() && text.is_char_boundary(cursor.offset) {
            Ok(())
        } else {
            Err(invalid_offset)
        }
    }

    /// Pre-order walk over every node.
    pub fn walk(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().flat_map(SyntaxNode::descendants)
    }

    /// Number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn find(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.walk().find(|node| node.id() == id)
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SyntaxNode> {
        let path = self.path_of(id)?;
        self.node_at_mut(&path)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Child indices leading from the root to `id`.
    pub fn path_of(&self, id: NodeId) -> Option<Vec<usize>> {
        fn search(nodes: &[SyntaxNode], id: NodeId, path: &mut Vec<usize>) -> bool {
            for (i, node) in nodes.iter().enumerate() {
                path.push(i);
                if node.id() == id || search(&node.children, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
        let mut path = Vec::new();
        search(&self.children, id, &mut path).then_some(path)
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&SyntaxNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get(*first)?;
        for &i in rest {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut SyntaxNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for &i in rest {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// The sibling list under the node at `parent_path`; the root list for `[]`.
    pub fn list(&self, parent_path: &[usize]) -> Option<&[SyntaxNode]> {
        if parent_path.is_empty() {
            return Some(&self.children);
        }
        self.node_at(parent_path).map(|node| node.children.as_slice())
    }

    pub fn list_mut(&mut self, parent_path: &[usize]) -> Option<&mut Vec<SyntaxNode>> {
        if parent_path.is_empty() {
            return Some(&mut self.children);
        }
        self.node_at_mut(parent_path).map(|node| &mut node.children)
    }

    /// Enclosing node of `id`; `None` for top-level nodes and unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<&SyntaxNode> {
        let path = self.path_of(id)?;
        let (_, parent) = path.split_last()?;
        self.node_at(parent)
    }

    /// The siblings of `id` (itself included) and its index among them.
    pub fn sibling_list(&self, id: NodeId) -> Option<(&[SyntaxNode], usize)> {
        let path = self.path_of(id)?;
        let (index, parent) = path.split_last()?;
        Some((self.list(parent)?, *index))
    }

    pub fn to_markdown(&self) -> String {
        blocks_markdown(&self.children, &self.trailing)
    }

    pub fn to_bare_text(&self) -> String {
        bare_text(&self.children)
    }

    pub fn to_html(&self) -> String {
        blocks_html(&self.children)
    }

    /// The cursor as child indices plus offset, independent of node ids.
    pub fn cursor_path(&self) -> Option<CursorPath> {
        let cursor = self.cursor?;
        Some(CursorPath {
            indices: self.path_of(cursor.node_id)?,
            offset: cursor.offset,
        })
    }

    /// Restore a cursor saved with [`SyntaxTree::cursor_path`]. The offset
    /// is clamped to the node's content.
    pub fn set_cursor_path(&mut self, path: &CursorPath) -> Result<(), TreeError> {
        let node = self
            .node_at(&path.indices)
            .ok_or_else(|| TreeError::InvalidPath(path.indices.clone()))?;
        let offset = floor_char_boundary(&node.content, path.offset);
        self.cursor = Some(TreeCursor::new(node.id(), offset));
        Ok(())
    }
}
