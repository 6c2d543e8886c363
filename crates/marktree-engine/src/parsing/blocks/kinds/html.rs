//! Html blocks: comments, void tags, one-line `<tag>text</tag>`, and
//! multi-line containers whose body is either parsed or kept raw.

use std::sync::OnceLock;

use marktree_syntax::TokenCursor;
use regex::Regex;

use crate::tree::{HtmlAttrs, HtmlShape, Trailing};

/// Tags that open an html block.
pub const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "canvas", "center", "details",
    "dialog", "dd", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "iframe", "li", "main", "nav",
    "noscript", "ol", "p", "picture", "pre", "section", "summary", "table", "template", "ul",
    "video",
];

/// Tags that never have a closing counterpart.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Tags whose body is kept verbatim.
pub const RAW_TAGS: &[&str] = &["script", "style"];

pub const COMMENT_OPEN: &str = "<!--";
pub const COMMENT_CLOSE: &str = "-->";
pub const COMMENT_NAME: &str = "!--";

fn tag_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9-]*)").expect("Invalid tag name regex"))
}

/// Body of a planned html block, still to be turned into nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlBody {
    None,
    /// Text between the tags of a one-line block.
    Inline(String),
    /// Markdown between the blank lines of a container.
    Nested(String),
}

/// Everything the parser needs to build an html block starting at the
/// cursor. Computed by lookahead only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPlan {
    /// For [`HtmlBody::Nested`] the shape's trailing lines are filled in
    /// once the body has been parsed.
    pub attrs: HtmlAttrs,
    pub lines: usize,
    pub body: HtmlBody,
}

pub struct HtmlBlock;

impl HtmlBlock {
    /// `custom-element` style names: at least one hyphen, no empty segment.
    pub fn is_custom_element(name: &str) -> bool {
        name.contains('-') && name.split('-').all(|part| !part.is_empty())
    }

    pub fn is_known(name: &str) -> bool {
        BLOCK_TAGS.contains(&name)
            || VOID_TAGS.contains(&name)
            || RAW_TAGS.contains(&name)
            || Self::is_custom_element(name)
    }

    /// Lowercased tag name when `text` starts with an html block opener.
    pub fn tag_name(text: &str) -> Option<String> {
        if text.starts_with(COMMENT_OPEN) {
            return Some(COMMENT_NAME.to_string());
        }
        let caps = tag_name_regex().captures(text)?;
        let name = caps[1].to_ascii_lowercase();
        let after = text[caps[0].len()..].chars().next();
        let ends_name = matches!(after, None | Some('>' | '/' | ' ' | '\t'));
        (ends_name && Self::is_known(&name)).then_some(name)
    }

    /// Plan the html block starting `at` lines ahead of the cursor, if any.
    pub fn plan(cursor: &TokenCursor<'_>, at: usize) -> Option<HtmlPlan> {
        let first = cursor.peek_line(at)?.text();
        let name = Self::tag_name(&first)?;
        if name == COMMENT_NAME {
            return Self::plan_comment(cursor, at, first);
        }
        if VOID_TAGS.contains(&name.as_str()) {
            return Some(HtmlPlan {
                attrs: attrs(name, first, String::new(), HtmlShape::Void),
                lines: 1,
                body: HtmlBody::None,
            });
        }
        let gt = find_tag_end(&first)?;
        let rest = &first[gt + 1..];
        if rest.trim().is_empty() {
            Self::plan_multi_line(cursor, at, name, first)
        } else {
            Self::plan_single_line(name, &first, gt)
        }
    }

    fn plan_comment(cursor: &TokenCursor<'_>, at: usize, first: String) -> Option<HtmlPlan> {
        let mut lines = vec![first];
        loop {
            if lines.last().is_some_and(|l| closes_comment(l, lines.len() == 1)) {
                break;
            }
            lines.push(cursor.peek_line(at + lines.len())?.text());
        }
        Some(HtmlPlan {
            lines: lines.len(),
            attrs: attrs(
                COMMENT_NAME.to_string(),
                lines.join("\n"),
                String::new(),
                HtmlShape::Comment,
            ),
            body: HtmlBody::None,
        })
    }

    fn plan_single_line(name: String, line: &str, gt: usize) -> Option<HtmlPlan> {
        let rest = &line[gt + 1..];
        let close = format!("</{name}>");
        let trimmed = rest.trim_end();
        if !trimmed.to_ascii_lowercase().ends_with(&close) {
            return None;
        }
        let split = trimmed.len() - close.len();
        let inner = rest[..split].to_string();
        let opening = line[..=gt].to_string();
        let closing = rest[split..].to_string();
        let (shape, body) = if RAW_TAGS.contains(&name.as_str()) {
            (HtmlShape::Raw { content: inner }, HtmlBody::None)
        } else {
            (HtmlShape::Inline, HtmlBody::Inline(inner))
        };
        Some(HtmlPlan {
            attrs: attrs(name, opening, closing, shape),
            lines: 1,
            body,
        })
    }

    fn plan_multi_line(
        cursor: &TokenCursor<'_>,
        at: usize,
        name: String,
        first: String,
    ) -> Option<HtmlPlan> {
        let raw = RAW_TAGS.contains(&name.as_str());
        let close = format!("</{name}>");
        let mut body: Vec<String> = Vec::new();
        let mut depth = 0usize;
        let closing = loop {
            let text = cursor.peek_line(at + body.len() + 1)?.text();
            let lower = text.trim().to_ascii_lowercase();
            if lower == close {
                if depth == 0 {
                    break text;
                }
                depth -= 1;
            } else if !raw && opens_tag(&lower, &name) && !lower.ends_with(&close) {
                depth += 1;
            }
            body.push(text);
        };
        let lines = body.len() + 2;
        let is_container = !raw
            && body.len() >= 2
            && body.first().is_some_and(|l| l.trim().is_empty())
            && body.last().is_some_and(|l| l.trim().is_empty());
        let joined: String = body.iter().map(|l| format!("{l}\n")).collect();
        let (shape, body) = if is_container {
            (
                HtmlShape::Container {
                    trailing: Trailing::default(),
                },
                HtmlBody::Nested(joined),
            )
        } else {
            (
                HtmlShape::Raw {
                    content: format!("\n{joined}"),
                },
                HtmlBody::None,
            )
        };
        Some(HtmlPlan {
            attrs: attrs(name, first, closing, shape),
            lines,
            body,
        })
    }
}

fn attrs(tag_name: String, opening_tag: String, closing_tag: String, shape: HtmlShape) -> HtmlAttrs {
    HtmlAttrs {
        tag_name,
        opening_tag,
        closing_tag,
        shape,
    }
}

fn closes_comment(line: &str, is_first: bool) -> bool {
    let search = if is_first {
        &line[COMMENT_OPEN.len()..]
    } else {
        line
    };
    search.contains(COMMENT_CLOSE)
}

fn opens_tag(lower: &str, name: &str) -> bool {
    lower
        .strip_prefix('<')
        .and_then(|s| s.strip_prefix(name))
        .is_some_and(|s| matches!(s.chars().next(), Some('>' | ' ' | '\t' | '/')))
}

/// Byte index of the `>` ending the opening tag, skipping quoted values.
fn find_tag_end(line: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, b) in line.bytes().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}
