use log::debug;

use crate::editing::{Cmd, EditorOptions, Patch, RenderHints};
use crate::error::TreeError;
use crate::parsing::parse;
use crate::tree::{CursorPath, NodeKind, Range, SyntaxNode, SyntaxTree, TreeCursor};

use super::{delete, enter, format, insert, range, select};

/// An editing session over one document tree.
///
/// ## Command-Based Editing
/// - All edits are `Cmd` values applied with [`Document::apply`]
/// - Every applied command returns a [`Patch`]: the markdown from before the
///   command plus the ids of updated, added and removed nodes
/// - A command that finds nothing to do, or a cursor that no longer points
///   into the tree, returns `None` and leaves the document untouched
///
/// ## Usage Pattern
///
/// ```rust
/// # use marktree_engine::editing::{Cmd, Document};
/// # use marktree_engine::tree::TreeCursor;
/// let mut doc = Document::new("#");
/// let id = doc.tree().children[0].id();
/// doc.set_cursor(TreeCursor::new(id, 1)).unwrap();
///
/// let patch = doc.apply(Cmd::InsertText { text: " ".into() }).unwrap();
/// assert_eq!(patch.before, "#");
/// assert_eq!(doc.to_markdown(), "# ");
/// assert_eq!(doc.tree().children[0].type_name(), "heading1");
/// ```
#[derive(Debug)]
pub struct Document {
    pub(crate) tree: SyntaxTree,
    /// Active selection, always between nodes of one sibling list.
    pub(crate) selection: Option<Range>,
    /// Select-all cycle position: 0 (none) to 3 (whole document).
    pub(crate) select_level: u8,
    pub(crate) options: EditorOptions,
    /// Incremented on each applied command
    pub(crate) version: u64,
}

impl Document {
    pub fn new(markdown: &str) -> Self {
        Document {
            tree: parse(markdown),
            selection: None,
            select_level: 0,
            options: EditorOptions::default(),
            version: 0,
        }
    }

    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TreeError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn options(&self) -> EditorOptions {
        self.options
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cursor(&self) -> Option<TreeCursor> {
        self.tree.cursor()
    }

    /// Move the cursor. Clears the selection and restarts select-all.
    pub fn set_cursor(&mut self, cursor: TreeCursor) -> Result<(), TreeError> {
        self.tree.set_cursor(cursor)?;
        self.selection = None;
        self.select_level = 0;
        Ok(())
    }

    pub fn set_cursor_path(&mut self, path: &CursorPath) -> Result<(), TreeError> {
        self.tree.set_cursor_path(path)?;
        self.selection = None;
        self.select_level = 0;
        Ok(())
    }

    pub fn selection(&self) -> Option<Range> {
        self.selection
    }

    pub fn select_level(&self) -> u8 {
        self.select_level
    }

    /// Select between two sibling nodes. The endpoints are put in document
    /// order and the cursor moves to the end of the selection.
    pub fn set_selection(&mut self, selection: Range) -> Result<(), TreeError> {
        let start_path = self
            .tree
            .path_of(selection.start_node_id)
            .ok_or(TreeError::UnknownNode(selection.start_node_id))?;
        let end_path = self
            .tree
            .path_of(selection.end_node_id)
            .ok_or(TreeError::UnknownNode(selection.end_node_id))?;
        let (start_index, start_parent) = start_path
            .split_last()
            .ok_or(TreeError::UnknownNode(selection.start_node_id))?;
        let (end_index, end_parent) = end_path
            .split_last()
            .ok_or(TreeError::UnknownNode(selection.end_node_id))?;
        if start_parent != end_parent {
            return Err(TreeError::CrossLevelRange(
                selection.start_node_id,
                selection.end_node_id,
            ));
        }

        let selection = if (start_index, selection.start_offset) > (end_index, selection.end_offset)
        {
            Range::new(
                selection.end_node_id,
                selection.end_offset,
                selection.start_node_id,
                selection.start_offset,
            )
        } else {
            selection
        };
        self.check_offset(selection.start_node_id, selection.start_offset)?;
        self.check_offset(selection.end_node_id, selection.end_offset)?;

        self.tree.place_cursor(TreeCursor::new(
            selection.end_node_id,
            selection.end_offset,
        ));
        self.selection = Some(selection);
        self.select_level = 0;
        Ok(())
    }

    fn check_offset(&self, id: crate::tree::NodeId, offset: usize) -> Result<(), TreeError> {
        let node = self.tree.find(id).ok_or(TreeError::UnknownNode(id))?;
        if offset <= node.content.len() && node.content.is_char_boundary(offset) {
            Ok(())
        } else {
            Err(TreeError::InvalidOffset { node: id, offset })
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.select_level = 0;
    }

    pub fn to_markdown(&self) -> String {
        self.tree.to_markdown()
    }

    pub fn to_html(&self) -> String {
        self.tree.to_html()
    }

    pub fn to_bare_text(&self) -> String {
        self.tree.to_bare_text()
    }

    /// Apply command to document
    ///
    /// Returns `None` when the command changed nothing: a stale cursor, an
    /// edit at a structural boundary, or a command that does not apply to
    /// the node under the cursor.
    pub fn apply(&mut self, cmd: Cmd) -> Option<Patch> {
        let before = self.tree.to_markdown();
        let mut hints = RenderHints::default();

        let applied = match &cmd {
            Cmd::InsertText { text } => insert::insert_text(self, text, &mut hints),
            Cmd::Backspace => delete::backspace(self, &mut hints),
            Cmd::Delete => delete::delete_forward(self, &mut hints),
            Cmd::Enter => enter::enter(self, &mut hints),
            Cmd::DeleteRange => range::delete_range(self, &mut hints),
            Cmd::ApplyFormat { format } => format::apply_format(self, format, &mut hints),
            Cmd::SelectAll => select::select_all(self),
        };
        applied?;

        if cmd != Cmd::SelectAll {
            self.select_level = 0;
        }
        self.version += 1;
        Some(Patch {
            before,
            hints,
            cursor: self.tree.cursor(),
            selection: self.selection,
            version: self.version,
        })
    }

    /// The cursor together with the path to its node, or `None` with a log
    /// line when the cursor is unset or points at a node that is gone.
    pub(crate) fn current(&self) -> Option<(TreeCursor, Vec<usize>)> {
        let cursor = self.tree.cursor()?;
        match self.tree.path_of(cursor.node_id) {
            Some(path) => Some((cursor, path)),
            None => {
                debug!("cursor points at missing node {}, ignoring", cursor.node_id);
                None
            }
        }
    }

    /// Active selection that covers at least one character.
    pub(crate) fn active_selection(&self) -> Option<Range> {
        self.selection.filter(|s| !s.is_collapsed())
    }

    pub(crate) fn node(&self, path: &[usize]) -> Option<&SyntaxNode> {
        self.tree.node_at(path)
    }

    /// Replace the node at `path` with an empty paragraph of the same id.
    pub(crate) fn demote_to_paragraph(&mut self, path: &[usize], hints: &mut RenderHints) -> Option<()> {
        let node = self.tree.node_at_mut(path)?;
        debug!("demoting {} {} to paragraph", node.type_name(), node.id());
        node.kind = NodeKind::paragraph();
        node.content.clear();
        node.children.clear();
        let id = node.id();
        hints.update(id);
        self.tree.place_cursor(TreeCursor::new(id, 0));
        Some(())
    }
}
