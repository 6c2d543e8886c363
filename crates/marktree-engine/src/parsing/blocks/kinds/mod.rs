//! Block kinds. Each kind owns its delimiters and a start predicate that
//! inspects a [`marktree_syntax::Line`] without consuming tokens.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod html;
pub mod image;
pub mod list;
pub mod paragraph;
pub mod rule;
pub mod table;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceOpen};
pub use heading::Heading;
pub use html::{HtmlBlock, HtmlBody, HtmlPlan};
pub use image::ImageBlock;
pub use list::{ListItem, ListStart};
pub use paragraph::Paragraph;
pub use rule::HorizontalRule;
pub use table::Table;
