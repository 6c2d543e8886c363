use marktree_syntax::{Line, TokenKind};

/// ATX heading: `#`..`######` followed by a space.
pub struct Heading;

impl Heading {
    pub const MARKER: TokenKind = TokenKind::HASH;
    pub const MAX_LEVEL: usize = 6;

    /// Length of the `#` run when the line opens a heading.
    pub fn detect(line: &Line<'_, '_>) -> Option<usize> {
        let n = line.run_len(0, Self::MARKER);
        (n > 0 && line.kind(n) == TokenKind::SPACE).then_some(n)
    }

    /// Level for a marker run, capped at six.
    pub fn level(marker_len: usize) -> u8 {
        marker_len.min(Self::MAX_LEVEL) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marktree_syntax::TokenCursor;
    use rstest::rstest;

    #[rstest]
    #[case("# a", Some(1))]
    #[case("### ", Some(3))]
    #[case("######## deep", Some(8))]
    #[case("#tag", None)]
    #[case("#", None)]
    #[case(" # a", None)]
    fn detect_heading(#[case] input: &str, #[case] expected: Option<usize>) {
        let cursor = TokenCursor::new(input);
        let line = cursor.peek_line(0).expect("line");
        assert_eq!(Heading::detect(&line), expected);
    }

    #[test]
    fn level_is_capped() {
        assert_eq!(Heading::level(2), 2);
        assert_eq!(Heading::level(9), 6);
    }
}
