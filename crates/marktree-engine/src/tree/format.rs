//! Inline format toggling over a node's raw content.

use log::debug;
use serde::Serialize;

use crate::parsing::inline::kinds::CodeSpan;
use crate::parsing::inline::{Delimiter, InlineTag, InlineTokenKind, pair_tokens, tokenize_inline};

use super::node::SyntaxNode;
use super::serialize::floor_char_boundary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "format")]
pub enum InlineFormat {
    Bold,
    Italic,
    Strikethrough,
    Code,
    Subscript,
    Superscript,
    Link { href: String },
}

impl InlineFormat {
    /// Parse a format name as used on the command line. Links take their
    /// target after a colon: `link:https://example.com`.
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(href) = name.strip_prefix("link:") {
            return Some(InlineFormat::Link {
                href: href.to_string(),
            });
        }
        match name {
            "bold" => Some(InlineFormat::Bold),
            "italic" => Some(InlineFormat::Italic),
            "strikethrough" => Some(InlineFormat::Strikethrough),
            "code" => Some(InlineFormat::Code),
            "sub" | "subscript" => Some(InlineFormat::Subscript),
            "sup" | "superscript" => Some(InlineFormat::Superscript),
            _ => None,
        }
    }

    /// Opening and closing markup for a wrap.
    fn markers(&self) -> (String, String) {
        match self {
            InlineFormat::Bold => (Delimiter::Bold.open_text(), Delimiter::Bold.close_text()),
            InlineFormat::Italic => (Delimiter::Italic.open_text(), Delimiter::Italic.close_text()),
            InlineFormat::Strikethrough => (
                Delimiter::Strikethrough.open_text(),
                Delimiter::Strikethrough.close_text(),
            ),
            InlineFormat::Code => ("`".into(), "`".into()),
            InlineFormat::Subscript => (InlineTag::Sub.open(), InlineTag::Sub.close()),
            InlineFormat::Superscript => (InlineTag::Sup.open(), InlineTag::Sup.close()),
            InlineFormat::Link { href } => ("[".into(), format!("]({href})")),
        }
    }

    /// Bytes to strip from each side of a `delim` span to remove this format.
    fn strip_len(&self, delim: Delimiter) -> Option<usize> {
        match (self, delim) {
            (InlineFormat::Bold, Delimiter::Bold | Delimiter::BoldItalic) => Some(2),
            (InlineFormat::Italic, Delimiter::Italic | Delimiter::BoldItalic) => Some(1),
            (InlineFormat::Strikethrough, Delimiter::Strikethrough) => Some(2),
            _ => None,
        }
    }

    fn toggles(&self) -> bool {
        !matches!(
            self,
            InlineFormat::Subscript | InlineFormat::Superscript | InlineFormat::Link { .. }
        )
    }
}

/// An existing formatted span: delimiters at `open` and `close`, each
/// `strip` bytes wide, around content `content_start..content_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    open: usize,
    close: usize,
    strip: usize,
    content_start: usize,
    content_end: usize,
}

fn find_spans(content: &str, format: &InlineFormat) -> Vec<Span> {
    let tokens = tokenize_inline(content);
    if *format == InlineFormat::Code {
        return tokens
            .iter()
            .filter(|t| matches!(t.kind, InlineTokenKind::CodeSpan { .. }))
            .map(|t| {
                let n = t.raw.bytes().take_while(|&b| b == CodeSpan::TICK).count();
                Span {
                    open: t.start,
                    close: t.end - n,
                    strip: n,
                    content_start: t.start + n,
                    content_end: t.end - n,
                }
            })
            .collect();
    }
    let partners = pair_tokens(&tokens);
    let mut spans = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let InlineTokenKind::Open { delim } = token.kind else {
            continue;
        };
        let (Some(j), Some(strip)) = (partners[i], format.strip_len(delim)) else {
            continue;
        };
        let close = &tokens[j];
        spans.push(Span {
            open: token.start,
            close: close.start,
            strip,
            content_start: token.end,
            content_end: close.start,
        });
    }
    spans
}

/// Toggle `format` over `start..end` of the node's content and return where
/// the cursor should land.
///
/// A selection touching an existing span of the same format removes that
/// span's delimiters. Otherwise the selection, or the word under a collapsed
/// cursor, is wrapped. Subscript, superscript and links are only applied.
pub fn apply_format(node: &mut SyntaxNode, start: usize, end: usize, format: &InlineFormat) -> usize {
    let content = &node.content;
    let (start, end) = (start.min(end), start.max(end));
    let start = floor_char_boundary(content, start);
    let end = floor_char_boundary(content, end);

    if format.toggles() {
        let hit = find_spans(content, format)
            .into_iter()
            .find(|s| start <= s.content_end && end >= s.content_start);
        if let Some(span) = hit {
            debug!("removing {format:?} at {}..{}", span.content_start, span.content_end);
            let content = &mut node.content;
            content.replace_range(span.close..span.close + span.strip, "");
            content.replace_range(span.open..span.open + span.strip, "");
            return span.content_end - span.strip;
        }
    }

    let (s, e) = if start == end {
        match word_at(content, start) {
            Some(word) => word,
            None => return start,
        }
    } else {
        let trimmed = content[start..end].trim_end().len();
        (start, start + trimmed)
    };
    if s == e {
        return end;
    }

    let (open, close) = format.markers();
    debug!("wrapping {s}..{e} in {format:?}");
    let content = &mut node.content;
    if *format == InlineFormat::Code {
        let wrapped = CodeSpan::wrap(&content[s..e]);
        content.replace_range(s..e, &wrapped);
        return s + wrapped.len();
    }
    content.insert_str(e, &close);
    content.insert_str(s, &open);
    e + open.len() + close.len()
}

/// Whitespace-delimited word around `at`, if there is one.
fn word_at(content: &str, at: usize) -> Option<(usize, usize)> {
    let start = content[..at]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let end = content[at..]
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map_or(content.len(), |(i, _)| at + i);
    (start < end).then_some((start, end))
}
