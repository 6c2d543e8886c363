//! Markdown and bare-text output, plus the mapping between content offsets
//! and offsets into a node's markdown.

use crate::parsing::inline::plain_text;

use super::node::{
    HtmlShape, ListAttrs, ListMarker, NodeId, NodeKind, SyntaxNode, Trailing, fill_at,
};
use super::table::TableGrid;

/// Markdown for a list of sibling blocks followed by their trailing lines.
pub fn blocks_markdown(nodes: &[SyntaxNode], trailing: &Trailing) -> String {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        push_gap(&mut out, node.blank_lines, &node.blank_fill);
        out.push_str(&node_markdown(node));
    }
    push_gap(&mut out, trailing.breaks, &trailing.fill);
    out.push_str(fill_at(&trailing.fill, trailing.breaks));
    out
}

fn push_gap(out: &mut String, lines: usize, fill: &[String]) {
    for i in 0..lines {
        out.push_str(fill_at(fill, i));
        out.push('\n');
    }
}

/// Markdown for one node, without surrounding blank lines.
pub fn node_markdown(node: &SyntaxNode) -> String {
    match &node.kind {
        NodeKind::Heading { marker_len, .. } => {
            format!("{} {}", "#".repeat(*marker_len), node.content)
        }
        NodeKind::Paragraph { .. } | NodeKind::HorizontalRule | NodeKind::Table => {
            node.content.clone()
        }
        NodeKind::BlockQuote { spaced } => node
            .content
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                if quote_spaced(spaced, i, line) {
                    format!("> {line}")
                } else {
                    format!(">{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        NodeKind::CodeBlock {
            language,
            fence_count,
            closed,
            blank_body,
        } => {
            let fence = "`".repeat(*fence_count);
            let mut out = format!("{fence}{language}");
            if !node.content.is_empty() || *blank_body {
                out.push('\n');
                out.push_str(&node.content);
            }
            if *closed {
                out.push('\n');
                out.push_str(&fence);
            }
            out
        }
        NodeKind::ListItem(attrs) => format!("{}{}", list_prefix(attrs), node.content),
        NodeKind::Image(img) => match (&img.html, &img.href) {
            (Some(html), _) => html.clone(),
            (None, Some(href)) => format!("[![{}]({})]({})", img.alt, img.url, href),
            (None, None) => format!("![{}]({})", img.alt, img.url),
        },
        NodeKind::HtmlBlock(html) => {
            let mut out = html.opening_tag.clone();
            match &html.shape {
                HtmlShape::Comment | HtmlShape::Void => return out,
                HtmlShape::Inline => {
                    for child in &node.children {
                        out.push_str(&child.content);
                    }
                }
                HtmlShape::Container { trailing } => {
                    out.push('\n');
                    out.push_str(&blocks_markdown(&node.children, trailing));
                }
                HtmlShape::Raw { content } => out.push_str(content),
            }
            out.push_str(&html.closing_tag);
            out
        }
    }
}

/// `  - [ ] ` style prefix of a list item.
pub fn list_prefix(attrs: &ListAttrs) -> String {
    let mut out = " ".repeat(attrs.spaces);
    match attrs.marker {
        ListMarker::Bullet(c) => out.push(c),
        ListMarker::Number(n) => {
            out.push_str(&n.to_string());
            out.push('.');
        }
    }
    out.push(' ');
    if let Some(mark) = attrs.checkbox {
        out.push('[');
        out.push(mark);
        out.push_str("] ");
    }
    out
}

/// Whether quote line `i` is written `> ` rather than `>`. Lines added by
/// edits fall back to a space unless empty.
fn quote_spaced(spaced: &[bool], i: usize, line: &str) -> bool {
    spaced.get(i).copied().unwrap_or(!line.is_empty())
}

fn quote_prefix(spaced: &[bool], i: usize, line: &str) -> usize {
    1 + usize::from(quote_spaced(spaced, i, line))
}

/// Offset into [`node_markdown`] for a content offset.
pub fn markdown_offset(node: &SyntaxNode, offset: usize) -> usize {
    let offset = offset.min(node.content.len());
    match &node.kind {
        NodeKind::Heading { marker_len, .. } => marker_len + 1 + offset,
        NodeKind::ListItem(attrs) => list_prefix(attrs).len() + offset,
        NodeKind::BlockQuote { spaced } => {
            let before = &node.content[..offset];
            let line = before.matches('\n').count();
            let prefixes: usize = node
                .content
                .split('\n')
                .take(line + 1)
                .enumerate()
                .map(|(i, text)| quote_prefix(spaced, i, text))
                .sum();
            offset + prefixes
        }
        NodeKind::CodeBlock {
            language,
            fence_count,
            ..
        } => fence_count + language.len() + 1 + offset,
        NodeKind::Paragraph { .. } | NodeKind::Table | NodeKind::HorizontalRule => offset,
        NodeKind::Image(_) | NodeKind::HtmlBlock(_) => 0,
    }
}

/// Content offset for an offset into [`node_markdown`], clamped to the
/// content and moved back onto a character boundary.
pub fn content_offset(node: &SyntaxNode, md: usize) -> usize {
    let raw = match &node.kind {
        NodeKind::Heading { marker_len, .. } => md.saturating_sub(marker_len + 1),
        NodeKind::ListItem(attrs) => md.saturating_sub(list_prefix(attrs).len()),
        NodeKind::BlockQuote { spaced } => quote_content_offset(&node.content, spaced, md),
        NodeKind::CodeBlock {
            language,
            fence_count,
            ..
        } => md.saturating_sub(fence_count + language.len() + 1),
        NodeKind::Paragraph { .. } | NodeKind::Table | NodeKind::HorizontalRule => md,
        NodeKind::Image(_) | NodeKind::HtmlBlock(_) => 0,
    };
    floor_char_boundary(&node.content, raw)
}

fn quote_content_offset(content: &str, spaced: &[bool], md: usize) -> usize {
    let mut md_start = 0;
    let mut content_start = 0;
    for (i, line) in content.split('\n').enumerate() {
        let prefix = quote_prefix(spaced, i, line);
        let md_len = prefix + line.len();
        if md <= md_start + md_len {
            return content_start + (md - md_start).saturating_sub(prefix);
        }
        md_start += md_len + 1;
        content_start += line.len() + 1;
    }
    content.len()
}

/// Largest character boundary of `s` that is `<= i`.
pub fn floor_char_boundary(s: &str, i: usize) -> usize {
    let mut i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Find the node and content offset that markdown offset `pos` of
/// `blocks_markdown(nodes, _)` falls in. Positions inside the blank lines
/// between blocks resolve to the end of the preceding block.
pub fn locate_markdown_offset(nodes: &[SyntaxNode], pos: usize) -> Option<(NodeId, usize)> {
    let mut at = 0;
    let mut previous_end: Option<(NodeId, usize)> = None;
    for (i, node) in nodes.iter().enumerate() {
        at += node.gap_len() + usize::from(i > 0);
        if pos < at {
            return previous_end.or(Some((node.id(), 0)));
        }
        let md_len = node_markdown(node).len();
        if pos <= at + md_len {
            return Some(locate_in_node(node, pos - at));
        }
        previous_end = Some((node.id(), node.content.len()));
        at += md_len;
    }
    previous_end
}

fn locate_in_node(node: &SyntaxNode, rel: usize) -> (NodeId, usize) {
    if let NodeKind::HtmlBlock(html) = &node.kind {
        let open = html.opening_tag.len();
        match &html.shape {
            HtmlShape::Inline => {
                if let Some(child) = node.children.first() {
                    let offset = rel.saturating_sub(open).min(child.content.len());
                    return (child.id(), floor_char_boundary(&child.content, offset));
                }
            }
            HtmlShape::Container { .. } => {
                if let Some(found) =
                    locate_markdown_offset(&node.children, rel.saturating_sub(open + 1))
                {
                    return found;
                }
            }
            _ => {}
        }
        return (node.id(), 0);
    }
    (node.id(), content_offset(node, rel))
}

/// Plain-text projection with all markup stripped.
pub fn bare_text(nodes: &[SyntaxNode]) -> String {
    let mut parts = Vec::new();
    for node in nodes {
        let text = node_bare_text(node);
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join("\n")
}

fn node_bare_text(node: &SyntaxNode) -> String {
    match &node.kind {
        NodeKind::Heading { .. } | NodeKind::ListItem(_) => plain_text(&node.content),
        NodeKind::Paragraph { bare_text: true } | NodeKind::CodeBlock { .. } => {
            node.content.clone()
        }
        NodeKind::Paragraph { .. } | NodeKind::BlockQuote { .. } => node
            .content
            .split('\n')
            .map(plain_text)
            .collect::<Vec<_>>()
            .join("\n"),
        NodeKind::Table => TableGrid::parse(&node.content)
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| plain_text(&cell.text))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n"),
        NodeKind::Image(img) => img.alt.clone(),
        NodeKind::HtmlBlock(_) => bare_text(&node.children),
        NodeKind::HorizontalRule => String::new(),
    }
}
