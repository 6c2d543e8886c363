use serde::Serialize;

use super::kinds::Delimiter;
use super::tokens::{InlineToken, InlineTokenKind, pair_tokens, tokenize_inline};

/// A node of the inline formatting tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum InlineSegment {
    Text { text: String },
    Code { code: String },
    Image { alt: String, src: String },
    Link {
        href: String,
        children: Vec<InlineSegment>,
    },
    Styled {
        style: Delimiter,
        children: Vec<InlineSegment>,
    },
}

impl InlineSegment {
    fn text(s: impl Into<String>) -> Self {
        InlineSegment::Text { text: s.into() }
    }

    /// Concatenated text with all markup removed.
    pub fn plain_text(&self) -> String {
        match self {
            InlineSegment::Text { text } => text.clone(),
            InlineSegment::Code { code } => code.clone(),
            InlineSegment::Image { alt, .. } => alt.clone(),
            InlineSegment::Link { children, .. } | InlineSegment::Styled { children, .. } => {
                children.iter().map(InlineSegment::plain_text).collect()
            }
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            InlineSegment::Text { text } => html_escape::encode_text(text).into_owned(),
            InlineSegment::Code { code } => {
                format!("<code>{}</code>", html_escape::encode_text(code))
            }
            InlineSegment::Image { alt, src } => format!(
                "<img src=\"{}\" alt=\"{}\">",
                html_escape::encode_double_quoted_attribute(src),
                html_escape::encode_double_quoted_attribute(alt)
            ),
            InlineSegment::Link { href, children } => format!(
                "<a href=\"{}\">{}</a>",
                html_escape::encode_double_quoted_attribute(href),
                segments_html(children)
            ),
            InlineSegment::Styled { style, children } => {
                let elements = style.html_elements();
                let mut out = String::new();
                for el in elements {
                    out.push_str(&format!("<{el}>"));
                }
                out.push_str(&segments_html(children));
                for el in elements.iter().rev() {
                    out.push_str(&format!("</{el}>"));
                }
                out
            }
        }
    }
}

pub fn segments_html(segments: &[InlineSegment]) -> String {
    segments.iter().map(InlineSegment::to_html).collect()
}

/// Builds the formatting tree for a token stream.
///
/// A pair whose partner lies outside the range being built (crossing
/// delimiters of different families) degrades to text, as does any stray
/// close. Adjacent text segments are merged.
pub fn build_inline_tree(tokens: &[InlineToken]) -> Vec<InlineSegment> {
    let partners = pair_tokens(tokens);
    build_range(tokens, &partners, 0, tokens.len())
}

fn build_range(
    tokens: &[InlineToken],
    partners: &[Option<usize>],
    lo: usize,
    hi: usize,
) -> Vec<InlineSegment> {
    let mut out = Vec::new();
    let mut i = lo;
    while i < hi {
        let token = &tokens[i];
        let segment = match &token.kind {
            InlineTokenKind::Text => InlineSegment::text(&token.raw),
            InlineTokenKind::CodeSpan { code } => InlineSegment::Code { code: code.clone() },
            InlineTokenKind::Image { alt, src } => InlineSegment::Image {
                alt: alt.clone(),
                src: src.clone(),
            },
            InlineTokenKind::Link { text, href } => InlineSegment::Link {
                href: href.clone(),
                children: parse_inline(text),
            },
            InlineTokenKind::Open { delim } => match partners[i] {
                Some(close) if close < hi => {
                    let children = build_range(tokens, partners, i + 1, close);
                    i = close + 1;
                    push_segment(
                        &mut out,
                        InlineSegment::Styled {
                            style: *delim,
                            children,
                        },
                    );
                    continue;
                }
                _ => InlineSegment::text(&token.raw),
            },
            InlineTokenKind::Close { .. } => InlineSegment::text(&token.raw),
        };
        push_segment(&mut out, segment);
        i += 1;
    }
    out
}

fn push_segment(out: &mut Vec<InlineSegment>, segment: InlineSegment) {
    if let (Some(InlineSegment::Text { text: last }), InlineSegment::Text { text }) =
        (out.last_mut(), &segment)
    {
        last.push_str(text);
        return;
    }
    out.push(segment);
}

/// Tokenize and build in one step.
pub fn parse_inline(content: &str) -> Vec<InlineSegment> {
    build_inline_tree(&tokenize_inline(content))
}

/// Inline content with all formatting stripped.
pub fn plain_text(content: &str) -> String {
    parse_inline(content)
        .iter()
        .map(InlineSegment::plain_text)
        .collect()
}

/// Inline content rendered as html.
pub fn inline_html(content: &str) -> String {
    segments_html(&parse_inline(content))
}
