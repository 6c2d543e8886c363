//! # Block Parsing
//!
//! One pass over the token stream with pure lookahead at each block
//! boundary.
//!
//! ## Dispatch
//!
//! At the start of every block [`BlockParser::classify`] tries the openers in
//! a fixed order and the first match wins: heading, code fence, blockquote,
//! unordered item, ordered item, horizontal rule, `<img>` line, html block,
//! table, standalone image. No match means paragraph. A paragraph keeps
//! absorbing lines until a blank line or a line that `classify` accepts.
//!
//! ## Modules
//!
//! - **`kinds`**: Block-specific types with owned delimiters and start predicates
//! - **`parser`**: `BlockParser`, which consumes lines and builds `SyntaxNode`s
//!
//! ## Key Invariants
//!
//! - Code fence and html bodies are raw zones: no block detection inside
//!   until their own terminator
//! - A closing fence must have exactly the opening fence's backtick count
//! - Html container bodies are parsed by a fresh parser; their line numbers
//!   are shifted once per nesting level

pub mod kinds;
pub mod parser;

pub use parser::{BlockParser, BlockStart, Blocks};
