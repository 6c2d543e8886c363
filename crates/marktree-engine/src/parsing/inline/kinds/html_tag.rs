use serde::Serialize;

use crate::parsing::inline::cursor::Cursor;

/// The inline html tags recognised as formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineTag {
    Sub,
    Sup,
    Strong,
    Em,
    Del,
    B,
    I,
    S,
}

impl InlineTag {
    pub const ALL: [InlineTag; 8] = [
        InlineTag::Sub,
        InlineTag::Sup,
        InlineTag::Strong,
        InlineTag::Em,
        InlineTag::Del,
        InlineTag::B,
        InlineTag::I,
        InlineTag::S,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InlineTag::Sub => "sub",
            InlineTag::Sup => "sup",
            InlineTag::Strong => "strong",
            InlineTag::Em => "em",
            InlineTag::Del => "del",
            InlineTag::B => "b",
            InlineTag::I => "i",
            InlineTag::S => "s",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    pub fn open(self) -> String {
        format!("<{}>", self.name())
    }

    pub fn close(self) -> String {
        format!("</{}>", self.name())
    }

    /// Scans `<tag>` or `</tag>` at the cursor. Returns the tag, whether it
    /// closes, and the byte length. Attributes are not accepted.
    pub fn scan(cur: &Cursor<'_>) -> Option<(InlineTag, bool, usize)> {
        if cur.peek() != Some(b'<') {
            return None;
        }
        let closing = cur.peek_at(1) == Some(b'/');
        let name_start = cur.pos() + 1 + usize::from(closing);
        let rest = cur.s.get(name_start..)?;
        let name_len = rest
            .bytes()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        if rest.as_bytes().get(name_len) != Some(&b'>') {
            return None;
        }
        let tag = Self::from_name(&rest[..name_len])?;
        Some((tag, closing, name_start + name_len + 1 - cur.pos()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_open_and_close() {
        assert_eq!(
            InlineTag::scan(&Cursor::new("<sub>x")),
            Some((InlineTag::Sub, false, 5))
        );
        assert_eq!(
            InlineTag::scan(&Cursor::new("</STRONG>")),
            Some((InlineTag::Strong, true, 9))
        );
    }

    #[test]
    fn unknown_or_attributed_tags_are_ignored() {
        assert_eq!(InlineTag::scan(&Cursor::new("<span>")), None);
        assert_eq!(InlineTag::scan(&Cursor::new("<b class=\"x\">")), None);
        assert_eq!(InlineTag::scan(&Cursor::new("<b")), None);
    }

    #[test]
    fn open_close_text() {
        assert_eq!(InlineTag::Sup.open(), "<sup>");
        assert_eq!(InlineTag::Sup.close(), "</sup>");
    }
}
