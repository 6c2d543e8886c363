use serde::Serialize;

use crate::tree::InlineFormat;

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "cmd")]
pub enum Cmd {
    /// Type or paste at the cursor, replacing an active selection.
    InsertText { text: String },
    Backspace,
    Delete,
    Enter,
    /// Delete the active selection.
    DeleteRange,
    /// Toggle a format over the selection, or the word at the cursor.
    ApplyFormat { format: InlineFormat },
    /// Grow the selection: node, content group, whole document, then wrap.
    SelectAll,
}

/// Editing-surface settings that change how commands behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EditorOptions {
    /// Html block tag text is editable through `TagPart` cursors.
    pub source_mode: bool,
}
