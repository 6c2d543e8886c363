//! # Inline Tokenizer / Tree Builder
//!
//! Turns a node's content into formatting segments in three steps:
//!
//! 1. [`scan`] splits the content into raw pieces. Precedence: code spans
//!    (raw zones), images, links, `*` runs, `~~`, allow-listed inline tags.
//! 2. Delimiters are paired with one stack per family. Anything left
//!    unpaired turns back into text ([`tokenize_inline`]).
//! 3. [`build_inline_tree`] nests paired delimiters into [`InlineSegment`]s.
//!
//! The same token stream drives format toggling in the tree module.

pub mod cursor;
pub mod kinds;
pub(crate) mod scan;
pub mod tokens;
pub mod tree;

pub use kinds::{Delimiter, InlineTag};
pub use scan::find_matched_delimiter_offsets;
pub use tokens::{InlineToken, InlineTokenKind, tokenize_inline};
pub use tree::{InlineSegment, build_inline_tree, inline_html, parse_inline, plain_text};

pub(crate) use tokens::pair_tokens;
