use marktree_syntax::{Line, TokenKind};

use crate::tree::{ListAttrs, ListMarker};

/// A detected list item line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStart {
    pub attrs: ListAttrs,
    /// Token index where the item content begins.
    pub content_from: usize,
}

pub struct ListItem;

impl ListItem {
    pub const BULLETS: [TokenKind; 3] = [TokenKind::DASH, TokenKind::STAR, TokenKind::PLUS];

    /// `- item`, `* item`, `+ item`, optionally indented, optional checkbox.
    pub fn detect_unordered(line: &Line<'_, '_>) -> Option<ListStart> {
        let spaces = line.leading_spaces();
        let bullet = line.tokens.get(spaces)?;
        if !Self::BULLETS.contains(&bullet.kind) || line.kind(spaces + 1) != TokenKind::SPACE {
            return None;
        }
        let marker = ListMarker::Bullet(bullet.kind.as_char()?);
        Some(Self::finish(line, spaces, marker, spaces + 2))
    }

    /// `N. item`. Multi-digit numbers may not start with zero, so the number
    /// always serializes back to the same digits.
    pub fn detect_ordered(line: &Line<'_, '_>) -> Option<ListStart> {
        let spaces = line.leading_spaces();
        let digits = line.run_len(spaces, TokenKind::DIGIT);
        if digits == 0
            || line.kind(spaces + digits) != TokenKind::DOT
            || line.kind(spaces + digits + 1) != TokenKind::SPACE
        {
            return None;
        }
        let text: String = line.tokens[spaces..spaces + digits]
            .iter()
            .map(|t| t.value)
            .collect();
        if digits > 1 && text.starts_with('0') {
            return None;
        }
        let number = text.parse().ok()?;
        Some(Self::finish(
            line,
            spaces,
            ListMarker::Number(number),
            spaces + digits + 2,
        ))
    }

    fn finish(line: &Line<'_, '_>, spaces: usize, marker: ListMarker, at: usize) -> ListStart {
        let (checkbox, content_from) = match Self::checkbox(line, at) {
            Some(mark) => (Some(mark), at + 4),
            None => (None, at),
        };
        ListStart {
            attrs: ListAttrs {
                marker,
                spaces,
                checkbox,
            },
            content_from,
        }
    }

    /// Mark of a `[ ] `, `[x] ` or `[X] ` at token index `at`.
    fn checkbox(line: &Line<'_, '_>, at: usize) -> Option<char> {
        if line.kind(at) != TokenKind::LBRACKET
            || line.kind(at + 2) != TokenKind::RBRACKET
            || line.kind(at + 3) != TokenKind::SPACE
        {
            return None;
        }
        let mark = line.tokens.get(at + 1)?;
        match (mark.kind, mark.value) {
            (TokenKind::SPACE, _) => Some(' '),
            (TokenKind::TEXT, "x") => Some('x'),
            (TokenKind::TEXT, "X") => Some('X'),
            _ => None,
        }
    }
}
