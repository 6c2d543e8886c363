use marktree_syntax::{Line, TokenKind};

/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix.
    pub const PREFIX: TokenKind = TokenKind::GT;

    pub fn detect(line: &Line<'_, '_>) -> bool {
        line.kind(0) == Self::PREFIX
    }

    /// Whether the `>` is followed by the optional space.
    pub fn spaced(line: &Line<'_, '_>) -> bool {
        line.kind(1) == TokenKind::SPACE
    }

    /// Line text after `>` and one optional space.
    pub fn strip(line: &Line<'_, '_>) -> String {
        line.text_from(1 + usize::from(Self::spaced(line)))
    }
}
