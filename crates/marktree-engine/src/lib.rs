pub mod editing;
pub mod error;
pub mod parsing;
pub mod tree;

// Re-export key types for easier usage
pub use editing::{Cmd, Document, EditorOptions, Patch, RenderHints};
pub use error::TreeError;
pub use parsing::{parse, parse_single_line};
pub use tree::{
    CursorPath, InlineFormat, NodeId, NodeKind, Range, SyntaxNode, SyntaxTree, TreeCursor,
};
