use marktree_syntax::{Line, TokenKind};

/// Thematic break: three or more of the same `-`, `*` or `_` at column 0.
pub struct HorizontalRule;

impl HorizontalRule {
    pub const MARKERS: [TokenKind; 3] = [TokenKind::DASH, TokenKind::STAR, TokenKind::UNDERSCORE];
    pub const MIN_RUN: usize = 3;

    pub fn detect(line: &Line<'_, '_>) -> bool {
        let kind = line.kind(0);
        if !Self::MARKERS.contains(&kind) {
            return false;
        }
        let run = line.run_len(0, kind);
        run >= Self::MIN_RUN && line.tokens[run..].iter().all(|t| t.kind == TokenKind::SPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marktree_syntax::TokenCursor;
    use rstest::rstest;

    #[rstest]
    #[case("---", true)]
    #[case("*****  ", true)]
    #[case("___", true)]
    #[case("--", false)]
    #[case("-*-", false)]
    #[case(" ---", false)]
    #[case("--- x", false)]
    fn detect_rule(#[case] input: &str, #[case] expected: bool) {
        let c = TokenCursor::new(input);
        assert_eq!(HorizontalRule::detect(&c.peek_line(0).expect("line")), expected);
    }
}
