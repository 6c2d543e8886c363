//! # marktree-syntax
//!
//! Character-class tokenizer for the marktree block parser, built on [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Pipeline
//!
//! ```text
//! Source Text → Lexer → Tokens → TokenCursor → (block parser in marktree-engine)
//!               (Logos)
//! ```
//!
//! Newlines are first-class tokens. Nothing downstream splits the input on
//! `\n`: a line is "the tokens up to the next NEWLINE or EOF", and the
//! [`TokenCursor`] counts lines as NEWLINE tokens are consumed. That lets
//! constructs such as fenced code and HTML blocks suppress block detection
//! for their bodies while still walking the same stream.
//!
//! ```
//! use marktree_syntax::{TokenCursor, TokenKind};
//!
//! let mut cursor = TokenCursor::new("# Hi\nthere");
//! assert!(cursor.at(TokenKind::HASH));
//! assert_eq!(cursor.peek_line(1).map(|l| l.text()).as_deref(), Some("there"));
//! cursor.skip_line();
//! assert_eq!(cursor.line(), 1);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! marktree-syntax/
//! ├── lib.rs         # This file - public API
//! ├── token_kind.rs  # TokenKind enum (SCREAMING_CASE kinds)
//! ├── lexer.rs       # Logos-based tokenizer
//! └── cursor.rs      # TokenCursor {tokens, pos, line} and Line views
//! ```

pub mod cursor;
pub mod lexer;
pub mod token_kind;

pub use cursor::{Line, TokenCursor};
pub use lexer::{Token, tokenize};
pub use token_kind::TokenKind;
