//! TokenKind enum for every lexical unit the block parser looks at.
//!
//! Following the rust-analyzer naming model, kinds are SCREAMING_CASE. Each
//! syntactically significant character gets its own kind; everything else is
//! folded into `TEXT`.

use serde::Serialize;

/// All token kinds produced by [`tokenize`](crate::lexer::tokenize).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    /// `#` for headings
    HASH,
    /// Single backtick, fences and code spans
    BACKTICK,
    /// A single space character
    SPACE,
    /// A single tab character
    TAB,
    /// Run of anything without syntactic meaning
    TEXT,
    /// A single ASCII digit (ordered list numbers)
    DIGIT,
    /// `.` after an ordered list number
    DOT,
    /// `-` for bullets, rules and table separators
    DASH,
    /// `*` for bullets, rules and emphasis
    STAR,
    /// `+` for bullets
    PLUS,
    /// `_` for rules
    UNDERSCORE,
    /// `>` for blockquotes and tag ends
    GT,
    /// `<` for html tags
    LT,
    /// `/` for closing tags
    FSLASH,
    /// `|` for table rows
    PIPE,
    /// `!` for images and comments
    BANG,
    /// `[` for links, images and checkboxes
    LBRACKET,
    /// `]` for links, images and checkboxes
    RBRACKET,
    /// `(` for link destinations
    LPAREN,
    /// `)` for link destinations
    RPAREN,
    /// Line ending (LF or CRLF)
    NEWLINE,
    /// End of input, always the last token
    EOF,
}

impl TokenKind {
    /// Returns true for horizontal whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::SPACE | Self::TAB)
    }

    /// Returns true for the kinds that terminate a line.
    pub fn ends_line(self) -> bool {
        matches!(self, Self::NEWLINE | Self::EOF)
    }

    /// The single character this kind always stands for, if any.
    pub fn as_char(self) -> Option<char> {
        Some(match self {
            Self::HASH => '#',
            Self::BACKTICK => '`',
            Self::SPACE => ' ',
            Self::TAB => '\t',
            Self::DOT => '.',
            Self::DASH => '-',
            Self::STAR => '*',
            Self::PLUS => '+',
            Self::UNDERSCORE => '_',
            Self::GT => '>',
            Self::LT => '<',
            Self::FSLASH => '/',
            Self::PIPE => '|',
            Self::BANG => '!',
            Self::LBRACKET => '[',
            Self::RBRACKET => ']',
            Self::LPAREN => '(',
            Self::RPAREN => ')',
            Self::TEXT | Self::DIGIT | Self::NEWLINE | Self::EOF => return None,
        })
    }
}
