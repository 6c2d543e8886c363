use crate::parsing::inline::cursor::Cursor;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones" - no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// At a backtick run of length `n`, finds the next run of exactly `n`
    /// backticks. Returns the byte position of that closing run.
    ///
    /// Does not move the cursor.
    pub fn find_close(cur: &Cursor<'_>) -> Option<usize> {
        let n = cur.run_len(Self::TICK);
        if n == 0 {
            return None;
        }
        let mut probe = cur.clone();
        probe.bump_n(n);
        while !probe.eof() {
            let m = probe.run_len(Self::TICK);
            if m == n {
                return Some(probe.pos());
            }
            if m > 0 {
                probe.bump_n(m);
            } else {
                probe.bump_char();
            }
        }
        None
    }

    /// Wraps `code` in a backtick run that cannot collide with its contents.
    pub fn wrap(code: &str) -> String {
        let longest = code
            .split(|c| c != '`')
            .map(str::len)
            .max()
            .unwrap_or(0);
        let fence = "`".repeat(longest + 1);
        format!("{fence}{code}{fence}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_matching_run() {
        let cur = Cursor::new("``a`b``");
        assert_eq!(CodeSpan::find_close(&cur), Some(5));
    }

    #[test]
    fn shorter_runs_are_skipped() {
        let cur = Cursor::new("```x``y");
        assert_eq!(CodeSpan::find_close(&cur), None);
    }

    #[test]
    fn wrap_avoids_inner_ticks() {
        assert_eq!(CodeSpan::wrap("x"), "`x`");
        assert_eq!(CodeSpan::wrap("a`b"), "``a`b``");
    }
}
