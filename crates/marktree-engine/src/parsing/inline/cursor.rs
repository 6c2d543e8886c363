/// Position in inline content being scanned.
///
/// All inline delimiters are ASCII, so lookahead works on bytes. Anything
/// that may step over non-ASCII text uses [`Cursor::bump_char`], which keeps
/// the position on a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    fn rest(&self) -> &'a [u8] {
        self.s.as_bytes().get(self.i..).unwrap_or_default()
    }

    pub fn peek(&self) -> Option<u8> {
        self.rest().first().copied()
    }

    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.rest().get(n).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().starts_with(pat)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Skip `n` bytes. Callers only skip ASCII they have already matched.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    pub fn bump_char(&mut self) -> Option<char> {
        let c = self.s.get(self.i..)?.chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// How many `b` bytes follow in a row, e.g. the length of a `***` run.
    pub fn run_len(&self, b: u8) -> usize {
        self.rest().iter().take_while(|&&x| x == b).count()
    }

    /// Flanking checks for delimiter runs look at the neighbouring chars.
    pub fn char_before(&self, at: usize) -> Option<char> {
        self.s.get(..at)?.chars().next_back()
    }

    pub fn char_at(&self, at: usize) -> Option<char> {
        self.s.get(at..)?.chars().next()
    }
}
