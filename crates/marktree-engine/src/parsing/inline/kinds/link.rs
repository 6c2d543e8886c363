use std::ops::Range;

use crate::parsing::inline::cursor::Cursor;

/// Links `[text](href)` and images `![alt](src)`.
pub struct Link;

/// Byte ranges of a parsed `[label](dest)` construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParts {
    pub label: Range<usize>,
    pub dest: Range<usize>,
    pub end: usize,
}

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const IMAGE: &'static [u8; 2] = b"![";

    /// Scans `[label](dest)` starting at the cursor's `[`.
    ///
    /// Brackets and parentheses nest; a backslash escapes the next byte.
    /// Does not move the cursor.
    pub fn scan(cur: &Cursor<'_>) -> Option<LinkParts> {
        if cur.peek() != Some(Self::OPEN) {
            return None;
        }
        let mut probe = cur.clone();
        probe.bump();
        let label_start = probe.pos();
        let label_end = Self::scan_balanced(&mut probe, Self::OPEN, Self::CLOSE)?;

        if probe.peek() != Some(Self::DEST_OPEN) {
            return None;
        }
        probe.bump();
        let dest_start = probe.pos();
        let dest_end = Self::scan_balanced(&mut probe, Self::DEST_OPEN, Self::DEST_CLOSE)?;

        Some(LinkParts {
            label: label_start..label_end,
            dest: dest_start..dest_end,
            end: probe.pos(),
        })
    }

    /// Advances past the closer matching an already consumed opener and
    /// returns the closer's position.
    fn scan_balanced(cur: &mut Cursor<'_>, open: u8, close: u8) -> Option<usize> {
        let mut depth = 1usize;
        while let Some(b) = cur.peek() {
            match b {
                b'\\' => {
                    cur.bump();
                    cur.bump_char();
                    continue;
                }
                _ if b == open => depth += 1,
                _ if b == close => {
                    depth -= 1;
                    if depth == 0 {
                        let at = cur.pos();
                        cur.bump();
                        return Some(at);
                    }
                }
                _ => {}
            }
            cur.bump_char();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_link() {
        let s = "[text](url) rest";
        let parts = Link::scan(&Cursor::new(s)).expect("link");
        assert_eq!(&s[parts.label.clone()], "text");
        assert_eq!(&s[parts.dest.clone()], "url");
        assert_eq!(parts.end, 11);
    }

    #[test]
    fn nested_brackets_in_label() {
        let s = "[![a](b)](c)";
        let parts = Link::scan(&Cursor::new(s)).expect("link");
        assert_eq!(&s[parts.label.clone()], "![a](b)");
        assert_eq!(&s[parts.dest.clone()], "c");
    }

    #[test]
    fn missing_destination() {
        assert_eq!(Link::scan(&Cursor::new("[text] (url)")), None);
        assert_eq!(Link::scan(&Cursor::new("[text](url")), None);
        assert_eq!(Link::scan(&Cursor::new("[text")), None);
    }

    #[test]
    fn escaped_bracket() {
        let s = r"[a\]b](c)";
        let parts = Link::scan(&Cursor::new(s)).expect("link");
        assert_eq!(&s[parts.label.clone()], r"a\]b");
    }
}
