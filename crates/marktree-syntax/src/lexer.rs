//! Character-class tokenizer.
//!
//! [`tokenize`] is total: it never fails and always ends the stream with one
//! `EOF` token. Concatenating the `raw` slices gives back the input byte for
//! byte:
//!
//! ```
//! use marktree_syntax::lexer::tokenize;
//!
//! let input = "> quote\r\n- item";
//! let raw: String = tokenize(input).iter().map(|t| t.raw).collect();
//! assert_eq!(raw, input);
//! ```
//!
//! A token's `value` is what the block parser reads. It equals `raw` except
//! for `NEWLINE`, whose value is `"\n"` for both LF and CRLF.
//!
//! [`RawToken`] is the enum [Logos] derives on; [`RawToken::to_token_kind`]
//! maps it onto the parser's [`TokenKind`]. Characters that can open a block
//! get a kind of their own and everything else lands in `TEXT` runs, which
//! are merged so that "a€b" stays one token.
//!
//! [Logos]: https://docs.rs/logos

use logos::Logos;
use serde::Serialize;

use crate::token_kind::TokenKind;

/// Token kinds recognised by the Logos lexer.
///
/// No `#[logos(skip)]`: all input is handled explicitly.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[token("#")]
    Hash,

    #[token("`")]
    Backtick,

    #[token(" ")]
    Space,

    #[token("\t")]
    Tab,

    #[regex(r"[0-9]")]
    Digit,

    #[token(".")]
    Dot,

    #[token("-")]
    Dash,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("_")]
    Underscore,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("/")]
    FSlash,

    #[token("|")]
    Pipe,

    #[token("!")]
    Bang,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// Plain text - anything not matched by other rules
    #[regex(r"[^#` \t0-9.\-*+_></|!\[\]()\r\n]+")]
    Text,
}

impl RawToken {
    /// Convert to TokenKind.
    pub fn to_token_kind(self) -> TokenKind {
        match self {
            RawToken::Hash => TokenKind::HASH,
            RawToken::Backtick => TokenKind::BACKTICK,
            RawToken::Space => TokenKind::SPACE,
            RawToken::Tab => TokenKind::TAB,
            RawToken::Digit => TokenKind::DIGIT,
            RawToken::Dot => TokenKind::DOT,
            RawToken::Dash => TokenKind::DASH,
            RawToken::Star => TokenKind::STAR,
            RawToken::Plus => TokenKind::PLUS,
            RawToken::Underscore => TokenKind::UNDERSCORE,
            RawToken::Gt => TokenKind::GT,
            RawToken::Lt => TokenKind::LT,
            RawToken::FSlash => TokenKind::FSLASH,
            RawToken::Pipe => TokenKind::PIPE,
            RawToken::Bang => TokenKind::BANG,
            RawToken::LBracket => TokenKind::LBRACKET,
            RawToken::RBracket => TokenKind::RBRACKET,
            RawToken::LParen => TokenKind::LPAREN,
            RawToken::RParen => TokenKind::RPAREN,
            RawToken::Newline => TokenKind::NEWLINE,
            RawToken::Text => TokenKind::TEXT,
        }
    }
}

/// A lexed token: its kind, the text the parser reads and the source slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub value: &'a str,
    pub raw: &'a str,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, raw: &'a str) -> Self {
        let value = if kind == TokenKind::NEWLINE { "\n" } else { raw };
        Token { kind, value, raw }
    }

    /// The end-of-input marker.
    pub fn eof() -> Self {
        Token {
            kind: TokenKind::EOF,
            value: "",
            raw: "",
        }
    }
}

/// Tokenize `input`.
///
/// Total: never fails, unrecognised input becomes TEXT, and the result always
/// ends with exactly one EOF token.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut lexer = RawToken::lexer(input);
    // Byte offset where the pending TEXT run started, if the last token is TEXT.
    let mut text_start: Option<usize> = None;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(raw) => raw.to_token_kind(),
            Err(()) => TokenKind::TEXT,
        };

        if kind == TokenKind::TEXT {
            if let Some(start) = text_start {
                // Extend the previous TEXT token over this span.
                if let Some(last) = tokens.last_mut() {
                    *last = Token::new(TokenKind::TEXT, &input[start..span.end]);
                }
                continue;
            }
            text_start = Some(span.start);
        } else {
            text_start = None;
        }
        tokens.push(Token::new(kind, &input[span]));
    }

    tokens.push(Token::eof());
    tokens
}
