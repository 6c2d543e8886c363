//! # Inline Kinds
//!
//! Inline types that own their syntax delimiters.
//!
//! - **`CodeSpan`**: backtick runs; a raw zone that suppresses other parsing
//! - **`Link`**: `[label](dest)`, also the tail of `![alt](src)`
//! - **`Emphasis`**: `*` runs and `~~`, mapped to a [`Delimiter`]
//! - **`InlineTag`**: the allow-listed inline html tags
//!
//! The scanner calls these; it never hardcodes a delimiter itself.

pub mod code_span;
pub mod emphasis;
pub mod html_tag;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::{Delimiter, Emphasis};
pub use html_tag::InlineTag;
pub use link::{Link, LinkParts};
