use std::sync::OnceLock;

use marktree_syntax::{Line, TokenKind};
use regex::Regex;

/// Opening line of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceOpen {
    /// Number of backticks; the closing fence must match it exactly.
    pub count: usize,
    pub language: String,
}

pub struct CodeFence;

impl CodeFence {
    pub const TICK: TokenKind = TokenKind::BACKTICK;
    pub const MIN_TICKS: usize = 3;

    pub fn detect(line: &Line<'_, '_>) -> Option<FenceOpen> {
        let count = line.run_len(0, Self::TICK);
        (count >= Self::MIN_TICKS).then(|| FenceOpen {
            count,
            language: line.text_from(count).trim().to_string(),
        })
    }

    /// A closing fence is exactly `count` backticks with only whitespace after.
    pub fn closes(line: &Line<'_, '_>, count: usize) -> bool {
        line.run_len(0, Self::TICK) == count
            && line.tokens[count..].iter().all(|t| t.kind.is_whitespace())
    }

    /// Matches a paragraph that consists of nothing but a fence, e.g.
    /// "```rust". Enter on such a line turns it into a code block.
    pub fn fence_line(text: &str) -> Option<FenceOpen> {
        static FENCE_LINE: OnceLock<Regex> = OnceLock::new();
        let re = FENCE_LINE.get_or_init(|| {
            Regex::new(r"^(`{3,})\s*([^`\s]*)\s*$").expect("Invalid fence regex")
        });
        let caps = re.captures(text)?;
        Some(FenceOpen {
            count: caps[1].len(),
            language: caps[2].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marktree_syntax::TokenCursor;

    fn line_of(input: &str) -> TokenCursor<'_> {
        TokenCursor::new(input)
    }

    #[test]
    fn detect_backtick_fence() {
        let c = line_of("````rust ");
        let open = CodeFence::detect(&c.peek_line(0).expect("line"));
        assert_eq!(
            open,
            Some(FenceOpen {
                count: 4,
                language: "rust".into()
            })
        );
    }

    #[test]
    fn two_ticks_are_not_a_fence() {
        let c = line_of("``x``");
        assert_eq!(CodeFence::detect(&c.peek_line(0).expect("line")), None);
    }

    #[test]
    fn closes_only_on_exact_length() {
        let c = line_of("```\n````\n```  ");
        assert!(CodeFence::closes(&c.peek_line(0).expect("line"), 3));
        assert!(!CodeFence::closes(&c.peek_line(1).expect("line"), 3));
        assert!(CodeFence::closes(&c.peek_line(2).expect("line"), 3));
    }

    #[test]
    fn fence_line_pattern() {
        assert_eq!(
            CodeFence::fence_line("```js"),
            Some(FenceOpen {
                count: 3,
                language: "js".into()
            })
        );
        assert_eq!(CodeFence::fence_line("``` "), Some(FenceOpen {
            count: 3,
            language: String::new()
        }));
        assert_eq!(CodeFence::fence_line("```a b"), None);
        assert_eq!(CodeFence::fence_line("``"), None);
    }
}
