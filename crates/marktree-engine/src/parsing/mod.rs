pub mod blocks;
pub mod inline;

use blocks::{BlockParser, Blocks};

use crate::tree::{SyntaxNode, SyntaxTree};

/// Parse a whole document.
pub fn parse(markdown: &str) -> SyntaxTree {
    SyntaxTree::from_blocks(parse_blocks(markdown))
}

/// Parse markdown into sibling blocks without wrapping them in a tree.
pub fn parse_blocks(markdown: &str) -> Blocks {
    BlockParser::new(markdown).parse()
}

/// Parse one line of markdown into a single node.
///
/// Returns `None` only when nothing but blank lines remains; callers treat
/// that as "no node to insert".
pub fn parse_single_line(line: &str) -> Option<SyntaxNode> {
    parse_blocks(line).nodes.into_iter().next()
}
