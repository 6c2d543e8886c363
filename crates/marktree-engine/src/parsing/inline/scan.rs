//! First inline pass: split content into raw pieces, then pair delimiters.

use std::collections::HashMap;

use super::cursor::Cursor;
use super::kinds::{CodeSpan, Delimiter, Emphasis, InlineTag, Link};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PieceKind {
    Text,
    Code(String),
    Image { alt: String, src: String },
    Link { text: String, href: String },
    Delim {
        delim: Delimiter,
        can_open: bool,
        can_close: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Piece {
    pub kind: PieceKind,
    pub start: usize,
    pub end: usize,
}

/// Splits `s` into pieces, in precedence order: code spans, images, links,
/// emphasis runs, inline tags. Everything else is text.
pub(crate) fn scan(s: &str) -> Vec<Piece> {
    let mut cur = Cursor::new(s);
    let mut out = Vec::new();
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<Piece>, start: usize, end: usize) {
        if end > start {
            out.push(Piece {
                kind: PieceKind::Text,
                start,
                end,
            });
        }
    }

    while let Some(b) = cur.peek() {
        let start = cur.pos();
        let piece = match b {
            CodeSpan::TICK => match CodeSpan::find_close(&cur) {
                Some(close) => {
                    let n = cur.run_len(CodeSpan::TICK);
                    Some((PieceKind::Code(s[start + n..close].to_string()), close + n))
                }
                None => {
                    // An unmatched run is literal as a whole.
                    cur.bump_n(cur.run_len(CodeSpan::TICK));
                    continue;
                }
            },
            b'!' if cur.starts_with(Link::IMAGE) => {
                let mut inner = cur.clone();
                inner.bump();
                Link::scan(&inner).map(|parts| {
                    let kind = PieceKind::Image {
                        alt: s[parts.label].to_string(),
                        src: s[parts.dest].to_string(),
                    };
                    (kind, parts.end)
                })
            }
            Link::OPEN => Link::scan(&cur).map(|parts| {
                let kind = PieceKind::Link {
                    text: s[parts.label].to_string(),
                    href: s[parts.dest].to_string(),
                };
                (kind, parts.end)
            }),
            Emphasis::STAR | Emphasis::TILDE => {
                let n = cur.run_len(b);
                let delim = if b == Emphasis::STAR {
                    Emphasis::star_run(n)
                } else {
                    Emphasis::tilde_run(n)
                };
                match delim {
                    Some(delim) => {
                        let end = start + n;
                        let can_open = cur.char_at(end).is_some_and(|c| !c.is_whitespace());
                        let can_close =
                            cur.char_before(start).is_some_and(|c| !c.is_whitespace());
                        Some((
                            PieceKind::Delim {
                                delim,
                                can_open,
                                can_close,
                            },
                            end,
                        ))
                    }
                    None => {
                        cur.bump_n(n);
                        continue;
                    }
                }
            }
            b'<' => InlineTag::scan(&cur).map(|(tag, closing, len)| {
                let kind = PieceKind::Delim {
                    delim: Delimiter::Tag(tag),
                    can_open: !closing,
                    can_close: closing,
                };
                (kind, start + len)
            }),
            b'\\' => {
                cur.bump();
                cur.bump_char();
                continue;
            }
            _ => None,
        };

        match piece {
            Some((kind, end)) => {
                flush_text(&mut out, text_start, start);
                out.push(Piece { kind, start, end });
                cur.bump_n(end - start);
                text_start = end;
            }
            None => {
                cur.bump_char();
            }
        }
    }

    flush_text(&mut out, text_start, s.len());
    out
}

/// Pairs delimiter pieces with a single pass and one stack per family.
///
/// A piece that may close pops the innermost open piece of its family;
/// otherwise, if it may open, it is pushed. Returns each piece's partner.
pub(crate) fn match_delimiters(pieces: &[Piece]) -> Vec<Option<usize>> {
    let mut partners = vec![None; pieces.len()];
    let mut stacks: HashMap<Delimiter, Vec<usize>> = HashMap::new();

    for (i, piece) in pieces.iter().enumerate() {
        let PieceKind::Delim {
            delim,
            can_open,
            can_close,
        } = piece.kind
        else {
            continue;
        };
        let stack = stacks.entry(delim).or_default();
        match stack.last() {
            Some(&open) if can_close => {
                stack.pop();
                partners[open] = Some(i);
                partners[i] = Some(open);
            }
            _ if can_open => stack.push(i),
            _ => {}
        }
    }
    partners
}

/// Byte positions of every delimiter character in `content` that is live
/// formatting rather than literal text. Code span backticks count as live.
pub fn find_matched_delimiter_offsets(content: &str) -> Vec<usize> {
    let pieces = scan(content);
    let partners = match_delimiters(&pieces);
    let mut live = Vec::new();
    for (piece, partner) in pieces.iter().zip(&partners) {
        match &piece.kind {
            PieceKind::Delim { .. } if partner.is_some() => live.extend(piece.start..piece.end),
            PieceKind::Code(code) => {
                let n = (piece.end - piece.start - code.len()) / 2;
                live.extend(piece.start..piece.start + n);
                live.extend(piece.end - n..piece.end);
            }
            _ => {}
        }
    }
    live
}
