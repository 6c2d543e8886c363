//! Token cursor threaded through block parsing.
//!
//! The cursor owns the token stream of one parse and tracks the current
//! position plus the zero-based line number, which advances only when a
//! `NEWLINE` token is consumed. Lines are never split out of the source
//! string; a "line" is always the tokens up to the next `NEWLINE`/`EOF`.

use crate::lexer::{Token, tokenize};
use crate::token_kind::TokenKind;

/// A borrowed view of one line's tokens, excluding its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'t, 'a> {
    pub tokens: &'t [Token<'a>],
}

impl<'t, 'a> Line<'t, 'a> {
    /// Concatenated token values.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.value).collect()
    }

    /// True when the line is empty or only spaces and tabs.
    pub fn is_blank(&self) -> bool {
        self.tokens.iter().all(|t| t.kind.is_whitespace())
    }

    pub fn kind(&self, n: usize) -> TokenKind {
        self.tokens.get(n).map_or(TokenKind::EOF, |t| t.kind)
    }

    /// Number of leading SPACE tokens.
    pub fn leading_spaces(&self) -> usize {
        self.tokens
            .iter()
            .take_while(|t| t.kind == TokenKind::SPACE)
            .count()
    }

    /// Length of the run of `kind` tokens starting at index `from`.
    pub fn run_len(&self, from: usize, kind: TokenKind) -> usize {
        self.tokens
            .iter()
            .skip(from)
            .take_while(|t| t.kind == kind)
            .count()
    }

    /// Text of the tokens from index `from` to the end of the line.
    pub fn text_from(&self, from: usize) -> String {
        self.tokens
            .iter()
            .skip(from)
            .map(|t| t.value)
            .collect()
    }
}

/// Cursor over a token stream: `{tokens, pos, line}`.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    line: usize,
}

impl<'a> TokenCursor<'a> {
    /// Tokenize `input` and position the cursor at the first token.
    pub fn new(input: &'a str) -> Self {
        Self::from_tokens(tokenize(input))
    }

    /// Wrap an existing token stream. An EOF is appended if missing.
    pub fn from_tokens(mut tokens: Vec<Token<'a>>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EOF) {
            tokens.push(Token::eof());
        }
        TokenCursor {
            tokens,
            pos: 0,
            line: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Zero-based line number of the current token.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn current(&self) -> Token<'a> {
        self.nth(0)
    }

    /// Token `n` positions ahead, or EOF past the end.
    pub fn nth(&self, n: usize) -> Token<'a> {
        self.tokens
            .get(self.pos + n)
            .copied()
            .unwrap_or_else(Token::eof)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub fn at_end(&self) -> bool {
        self.at(TokenKind::EOF)
    }

    /// True when the previous token was a NEWLINE (or there is none).
    pub fn at_line_start(&self) -> bool {
        self.pos == 0 || self.tokens[self.pos - 1].kind == TokenKind::NEWLINE
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume and return the current token. EOF is never consumed.
    pub fn bump(&mut self) -> Token<'a> {
        let token = self.current();
        match token.kind {
            TokenKind::EOF => {}
            TokenKind::NEWLINE => {
                self.pos += 1;
                self.line += 1;
            }
            _ => self.pos += 1,
        }
        token
    }

    /// Line `k` lines ahead of the current position without consuming
    /// anything. `k = 0` is the rest of the current line.
    ///
    /// Returns `None` when the input ends before line `k` starts; a final
    /// line terminator does not start a new line.
    pub fn peek_line(&self, k: usize) -> Option<Line<'_, 'a>> {
        let mut start = self.pos;
        for _ in 0..k {
            loop {
                match self.tokens.get(start).map(|t| t.kind) {
                    Some(TokenKind::NEWLINE) => {
                        start += 1;
                        break;
                    }
                    Some(TokenKind::EOF) | None => return None,
                    Some(_) => start += 1,
                }
            }
            if self.tokens.get(start).map(|t| t.kind) == Some(TokenKind::EOF) {
                return None;
            }
        }
        let end = self.line_end(start);
        Some(Line {
            tokens: &self.tokens[start..end],
        })
    }

    /// Consume the rest of the current line, excluding its terminator.
    pub fn bump_line(&mut self) -> Line<'_, 'a> {
        let start = self.pos;
        let end = self.line_end(start);
        self.pos = end;
        Line {
            tokens: &self.tokens[start..end],
        }
    }

    /// Consume the rest of the current line and return its text.
    pub fn take_line_text(&mut self) -> String {
        self.bump_line().text()
    }

    /// Consume one line terminator if present.
    pub fn eat_newline(&mut self) -> bool {
        self.eat(TokenKind::NEWLINE)
    }

    /// Consume the rest of this line and its NEWLINE, landing on the next line.
    pub fn skip_line(&mut self) {
        self.bump_line();
        self.eat_newline();
    }

    fn line_end(&self, start: usize) -> usize {
        let mut end = start;
        while end < self.tokens.len() && !self.tokens[end].kind.ends_line() {
            end += 1;
        }
        end
    }
}
