//! Cursor and range addressing.
//!
//! Offsets are UTF-8 byte offsets into a node's `content` and always sit on a
//! character boundary. Table cells and html tag text use their own offset
//! spaces, selected by `cell` and `tag_part`.

use serde::Serialize;

use super::node::NodeId;

/// Which tag text of an html block a cursor is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPart {
    Opening,
    Closing,
}

/// Zero-based table cell position; row 0 is the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

/// The single active caret of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeCursor {
    pub node_id: NodeId,
    pub offset: usize,
    pub tag_part: Option<TagPart>,
    pub cell: Option<CellAddress>,
}

impl TreeCursor {
    pub fn new(node_id: NodeId, offset: usize) -> Self {
        TreeCursor {
            node_id,
            offset,
            tag_part: None,
            cell: None,
        }
    }

    pub fn in_tag(node_id: NodeId, part: TagPart, offset: usize) -> Self {
        TreeCursor {
            tag_part: Some(part),
            ..Self::new(node_id, offset)
        }
    }

    pub fn in_cell(node_id: NodeId, row: usize, col: usize, offset: usize) -> Self {
        TreeCursor {
            cell: Some(CellAddress { row, col }),
            ..Self::new(node_id, offset)
        }
    }
}

/// A selection between two positions in sibling nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start_node_id: NodeId,
    pub start_offset: usize,
    pub end_node_id: NodeId,
    pub end_offset: usize,
}

impl Range {
    pub fn new(start: NodeId, start_offset: usize, end: NodeId, end_offset: usize) -> Self {
        Range {
            start_node_id: start,
            start_offset,
            end_node_id: end,
            end_offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start_node_id == self.end_node_id && self.start_offset == self.end_offset
    }

    pub fn is_single_node(&self) -> bool {
        self.start_node_id == self.end_node_id
    }
}

/// Identity-free cursor position: child indices from the root, then an offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CursorPath {
    pub indices: Vec<usize>,
    pub offset: usize,
}
