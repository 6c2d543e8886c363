use serde::Serialize;

use super::html_tag::InlineTag;

/// A formatting delimiter family. Each family is matched with its own stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Italic,
    Bold,
    BoldItalic,
    Strikethrough,
    Tag(InlineTag),
}

/// Emphasis delimiter constants.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const TILDE: u8 = b'~';

    /// Delimiter for a run of `n` stars; four or more is literal text.
    pub fn star_run(n: usize) -> Option<Delimiter> {
        match n {
            1 => Some(Delimiter::Italic),
            2 => Some(Delimiter::Bold),
            3 => Some(Delimiter::BoldItalic),
            _ => None,
        }
    }

    /// Only `~~` exactly is a strikethrough delimiter.
    pub fn tilde_run(n: usize) -> Option<Delimiter> {
        (n == 2).then_some(Delimiter::Strikethrough)
    }
}

impl Delimiter {
    pub fn open_text(self) -> String {
        match self {
            Delimiter::Tag(tag) => tag.open(),
            _ => self.markdown().to_string(),
        }
    }

    pub fn close_text(self) -> String {
        match self {
            Delimiter::Tag(tag) => tag.close(),
            _ => self.markdown().to_string(),
        }
    }

    fn markdown(self) -> &'static str {
        match self {
            Delimiter::Italic => "*",
            Delimiter::Bold => "**",
            Delimiter::BoldItalic => "***",
            Delimiter::Strikethrough => "~~",
            Delimiter::Tag(_) => "",
        }
    }

    /// The html elements this delimiter renders as, outermost first.
    pub fn html_elements(self) -> &'static [&'static str] {
        match self {
            Delimiter::Italic => &["em"],
            Delimiter::Bold => &["strong"],
            Delimiter::BoldItalic => &["strong", "em"],
            Delimiter::Strikethrough => &["del"],
            Delimiter::Tag(InlineTag::Sub) => &["sub"],
            Delimiter::Tag(InlineTag::Sup) => &["sup"],
            Delimiter::Tag(InlineTag::Strong) => &["strong"],
            Delimiter::Tag(InlineTag::Em) => &["em"],
            Delimiter::Tag(InlineTag::Del) => &["del"],
            Delimiter::Tag(InlineTag::B) => &["b"],
            Delimiter::Tag(InlineTag::I) => &["i"],
            Delimiter::Tag(InlineTag::S) => &["s"],
        }
    }
}
