/*!
 * # Editing
 *
 * Structural editing over a parsed [`SyntaxTree`](crate::tree::SyntaxTree).
 *
 * ## Architecture Overview
 *
 * ### 1. The Tree Is the Model
 * - A [`Document`] owns one tree plus the cursor, selection and options
 * - Markdown is produced from the tree on demand and round-trips exactly for
 *   any tree the parser built
 *
 * ### 2. Command-Based Editing
 * - All edits are [`Cmd`] values applied with [`Document::apply`]
 * - Each command resolves the node under the cursor, then branches on how
 *   the cursor addresses it: table cell, html tag text, code block text or
 *   plain content
 * - Text edits on markdown blocks go through the node's markdown and are
 *   parsed again, which is how typing `# ` promotes a paragraph to a heading
 *
 * ### 3. Patches
 * - An applied command returns a [`Patch`]: the markdown from before the
 *   edit for caller-owned undo, and [`RenderHints`] naming the node ids that
 *   were updated, added or removed
 * - A removed id is never reported as updated
 *
 * ## Module Structure
 *
 * - **`document`**: `Document`, addressing setters and command dispatch
 * - **`commands`**: the `Cmd` enum and `EditorOptions`
 * - **`patch`**: `Patch` and `RenderHints`
 * - **`insert`**, **`delete`**, **`enter`**: the keystroke commands
 * - **`range`**, **`select`**: selection delete and select-all cycling
 * - **`format`**: inline format toggling at the cursor or selection
 * - **`reparse`**, **`addressed`**: shared splice helpers
 *
 * ## Usage Pattern
 *
 * ```rust
 * use marktree_engine::editing::{Cmd, Document};
 * use marktree_engine::tree::TreeCursor;
 *
 * let mut doc = Document::new("- milk\n- eggs");
 * let eggs = doc.tree().children[1].id();
 * doc.set_cursor(TreeCursor::new(eggs, 4)).unwrap();
 *
 * let patch = doc.apply(Cmd::Enter).unwrap();
 * assert_eq!(patch.before, "- milk\n- eggs");
 * assert_eq!(patch.hints.added.len(), 1);
 * assert_eq!(doc.to_markdown(), "- milk\n- eggs\n- ");
 * ```
 */

mod addressed;
pub mod commands;
mod delete;
pub mod document;
mod enter;
mod format;
mod insert;
pub mod patch;
mod range;
mod reparse;
mod select;

pub use commands::{Cmd, EditorOptions};
pub use document::Document;
pub use patch::{Patch, RenderHints};
