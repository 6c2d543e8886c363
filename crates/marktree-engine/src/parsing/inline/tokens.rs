use std::collections::HashMap;

use serde::Serialize;

use super::kinds::Delimiter;
use super::scan::{PieceKind, match_delimiters, scan};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum InlineTokenKind {
    Text,
    CodeSpan { code: String },
    Image { alt: String, src: String },
    Link { text: String, href: String },
    Open { delim: Delimiter },
    Close { delim: Delimiter },
}

/// One inline token with its byte span in the tokenized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineToken {
    pub kind: InlineTokenKind,
    pub start: usize,
    pub end: usize,
    pub raw: String,
}

impl InlineToken {
    pub fn is_text(&self) -> bool {
        self.kind == InlineTokenKind::Text
    }
}

/// Tokenizes inline content. Delimiters without a partner become text and
/// adjacent text tokens are merged, so the stream never holds a dangling
/// open or close.
pub fn tokenize_inline(content: &str) -> Vec<InlineToken> {
    let pieces = scan(content);
    let partners = match_delimiters(&pieces);
    let mut out: Vec<InlineToken> = Vec::with_capacity(pieces.len());

    for (i, piece) in pieces.into_iter().enumerate() {
        let kind = match piece.kind {
            PieceKind::Text => InlineTokenKind::Text,
            PieceKind::Code(code) => InlineTokenKind::CodeSpan { code },
            PieceKind::Image { alt, src } => InlineTokenKind::Image { alt, src },
            PieceKind::Link { text, href } => InlineTokenKind::Link { text, href },
            PieceKind::Delim { delim, .. } => match partners[i] {
                Some(p) if p > i => InlineTokenKind::Open { delim },
                Some(_) => InlineTokenKind::Close { delim },
                None => InlineTokenKind::Text,
            },
        };

        if kind == InlineTokenKind::Text {
            if let Some(last) = out.last_mut().filter(|t| t.is_text()) {
                last.end = piece.end;
                last.raw = content[last.start..last.end].to_string();
                continue;
            }
        }
        out.push(InlineToken {
            kind,
            start: piece.start,
            end: piece.end,
            raw: content[piece.start..piece.end].to_string(),
        });
    }
    out
}

/// Partner index of every Open/Close token, recomputed with one stack per
/// delimiter family.
pub(crate) fn pair_tokens(tokens: &[InlineToken]) -> Vec<Option<usize>> {
    let mut partners = vec![None; tokens.len()];
    let mut stacks: HashMap<Delimiter, Vec<usize>> = HashMap::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            InlineTokenKind::Open { delim } => stacks.entry(delim).or_default().push(i),
            InlineTokenKind::Close { delim } => {
                if let Some(open) = stacks.entry(delim).or_default().pop() {
                    partners[open] = Some(i);
                    partners[i] = Some(open);
                }
            }
            _ => {}
        }
    }
    partners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::kinds::InlineTag;
    use pretty_assertions::assert_eq;

    fn kinds(s: &str) -> Vec<InlineTokenKind> {
        tokenize_inline(s).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn unmatched_bold_is_text() {
        let tokens = tokenize_inline("a **b c");
        assert_eq!(tokens.len(), 1);
        assert!(tokens.iter().all(InlineToken::is_text));
        assert_eq!(tokens[0].raw, "a **b c");
    }

    #[test]
    fn four_stars_are_literal() {
        let tokens = tokenize_inline("a **** b");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, InlineTokenKind::Text);
        assert_eq!(tokens[0].raw, "a **** b");
    }

    #[test]
    fn bold_italic_and_strike() {
        assert_eq!(
            kinds("***x*** ~~y~~"),
            vec![
                InlineTokenKind::Open {
                    delim: Delimiter::BoldItalic
                },
                InlineTokenKind::Text,
                InlineTokenKind::Close {
                    delim: Delimiter::BoldItalic
                },
                InlineTokenKind::Text,
                InlineTokenKind::Open {
                    delim: Delimiter::Strikethrough
                },
                InlineTokenKind::Text,
                InlineTokenKind::Close {
                    delim: Delimiter::Strikethrough
                },
            ]
        );
    }

    #[test]
    fn code_span_wins_over_emphasis() {
        assert_eq!(
            kinds("`*a*`"),
            vec![InlineTokenKind::CodeSpan {
                code: "*a*".to_string()
            }]
        );
    }

    #[test]
    fn html_tags() {
        assert_eq!(
            kinds("H<sub>2</sub>O"),
            vec![
                InlineTokenKind::Text,
                InlineTokenKind::Open {
                    delim: Delimiter::Tag(InlineTag::Sub)
                },
                InlineTokenKind::Text,
                InlineTokenKind::Close {
                    delim: Delimiter::Tag(InlineTag::Sub)
                },
                InlineTokenKind::Text,
            ]
        );
    }

    #[test]
    fn spans_cover_input() {
        let s = "a [l](h) *b* `c` ![i](s)";
        let tokens = tokenize_inline(s);
        let joined: String = tokens.iter().map(|t| t.raw.as_str()).collect();
        assert_eq!(joined, s);
        for t in &tokens {
            assert_eq!(&s[t.start..t.end], t.raw);
        }
    }

    #[test]
    fn pairs_tokens() {
        let tokens = tokenize_inline("**a** *b*");
        let partners = pair_tokens(&tokens);
        assert_eq!(partners[0], Some(2));
        assert_eq!(partners[4], Some(6));
    }
}
