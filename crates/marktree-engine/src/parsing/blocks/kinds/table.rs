use marktree_syntax::{Line, TokenKind};

use crate::tree::is_separator_row;

/// Pipe table. Rows are stored verbatim; cells are derived on demand.
pub struct Table;

impl Table {
    pub const PIPE: TokenKind = TokenKind::PIPE;

    pub fn detect(line: &Line<'_, '_>) -> bool {
        line.kind(0) == Self::PIPE
    }

    /// A following line that still belongs to the table.
    pub fn continues(line: &Line<'_, '_>) -> bool {
        let text = line.text();
        text.trim_start().starts_with('|') || is_separator_row(&text)
    }
}
