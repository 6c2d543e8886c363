//! HTML rendering of a block list.
//!
//! Consecutive list items become nested `<ul>`/`<ol>` elements driven by
//! their indent. Html blocks are emitted verbatim around their rendered
//! children.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::parsing::inline::inline_html;

use super::node::{HtmlShape, ImageAttrs, ListAttrs, NodeKind, SyntaxNode};
use super::table::TableGrid;

/// Open lists while rendering a run of list items: `(indent, ordered)`.
#[derive(Default)]
struct ListStack {
    open: Vec<(usize, bool)>,
}

impl ListStack {
    fn push_item(&mut self, out: &mut String, attrs: &ListAttrs) {
        let ordered = attrs.ordered();
        let level = attrs.indent();
        while let Some(&(indent, top_ordered)) = self.open.last() {
            if indent > level || (indent == level && top_ordered != ordered) {
                close_list(out, top_ordered);
                self.open.pop();
            } else {
                break;
            }
        }
        match self.open.last() {
            Some(&(indent, _)) if indent == level => out.push_str("</li>\n"),
            top => {
                if top.is_some() {
                    out.push('\n');
                }
                match attrs.number() {
                    None => out.push_str("<ul>\n"),
                    Some(1) => out.push_str("<ol>\n"),
                    Some(n) => out.push_str(&format!("<ol start=\"{n}\">\n")),
                }
                self.open.push((level, ordered));
            }
        }
        out.push_str("<li>");
        match attrs.checked() {
            Some(true) => out.push_str("<input type=\"checkbox\" disabled checked> "),
            Some(false) => out.push_str("<input type=\"checkbox\" disabled> "),
            None => {}
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while let Some((_, ordered)) = self.open.pop() {
            close_list(out, ordered);
        }
    }
}

fn close_list(out: &mut String, ordered: bool) {
    out.push_str(if ordered { "</li>\n</ol>\n" } else { "</li>\n</ul>\n" });
}

/// HTML for a list of sibling blocks.
pub fn blocks_html(nodes: &[SyntaxNode]) -> String {
    let mut out = String::new();
    let mut lists = ListStack::default();
    for node in nodes {
        if let NodeKind::ListItem(attrs) = &node.kind {
            lists.push_item(&mut out, attrs);
            out.push_str(&inline_html(&node.content));
            continue;
        }
        lists.close_all(&mut out);
        out.push_str(&node_html(node));
    }
    lists.close_all(&mut out);
    out
}

fn node_html(node: &SyntaxNode) -> String {
    match &node.kind {
        NodeKind::Heading { level, .. } => {
            format!("<h{level}>{}</h{level}>\n", inline_html(&node.content))
        }
        NodeKind::Paragraph { bare_text: true } => format!("{}\n", encode_text(&node.content)),
        NodeKind::Paragraph { .. } => format!("<p>{}</p>\n", inline_html(&node.content)),
        NodeKind::BlockQuote { .. } => {
            let mut out = String::from("<blockquote>\n");
            for para in node.content.split("\n\n") {
                let para = para.trim_matches('\n');
                if !para.is_empty() {
                    out.push_str(&format!("<p>{}</p>\n", inline_html(para)));
                }
            }
            out.push_str("</blockquote>\n");
            out
        }
        NodeKind::CodeBlock { language, .. } => {
            let class = if language.is_empty() {
                String::new()
            } else {
                format!(" class=\"language-{}\"", encode_double_quoted_attribute(language))
            };
            format!(
                "<pre><code{class}>{}</code></pre>\n",
                encode_text(&node.content)
            )
        }
        NodeKind::ListItem(_) => blocks_html(std::slice::from_ref(node)),
        NodeKind::HorizontalRule => "<hr>\n".to_string(),
        NodeKind::Image(img) => format!("{}\n", image_html(img)),
        NodeKind::Table => table_html(&node.content),
        NodeKind::HtmlBlock(html) => {
            let mut out = html.opening_tag.clone();
            match &html.shape {
                HtmlShape::Comment | HtmlShape::Void => {}
                HtmlShape::Inline => {
                    for child in &node.children {
                        out.push_str(&child.content);
                    }
                    out.push_str(&html.closing_tag);
                }
                HtmlShape::Container { .. } => {
                    out.push('\n');
                    out.push_str(&blocks_html(&node.children));
                    out.push_str(&html.closing_tag);
                }
                HtmlShape::Raw { content } => {
                    out.push_str(content);
                    out.push_str(&html.closing_tag);
                }
            }
            out.push('\n');
            out
        }
    }
}

fn image_html(img: &ImageAttrs) -> String {
    if let Some(html) = &img.html {
        return html.trim().to_string();
    }
    let mut tag = format!(
        "<img src=\"{}\" alt=\"{}\"",
        encode_double_quoted_attribute(&img.url),
        encode_double_quoted_attribute(&img.alt)
    );
    if let Some(style) = &img.style {
        tag.push_str(&format!(" style=\"{}\"", encode_double_quoted_attribute(style)));
    }
    tag.push('>');
    match &img.href {
        Some(href) => format!(
            "<a href=\"{}\">{tag}</a>",
            encode_double_quoted_attribute(href)
        ),
        None => tag,
    }
}

fn table_html(content: &str) -> String {
    let grid = TableGrid::parse(content);
    let mut out = String::from("<table>\n");
    for (r, row) in grid.rows.iter().enumerate() {
        let header = r < grid.header_rows;
        if r == 0 && header {
            out.push_str("<thead>\n");
        }
        if r == grid.header_rows {
            out.push_str("<tbody>\n");
        }
        out.push_str("<tr>\n");
        let tag = if header { "th" } else { "td" };
        for (c, cell) in row.iter().enumerate() {
            let style = grid
                .alignment(c)
                .map(|a| format!(" style=\"text-align: {}\"", a.as_str()))
                .unwrap_or_default();
            out.push_str(&format!("<{tag}{style}>{}</{tag}>\n", inline_html(&cell.text)));
        }
        out.push_str("</tr>\n");
        if header && r + 1 == grid.header_rows {
            out.push_str("</thead>\n");
        }
    }
    if grid.rows.len() > grid.header_rows {
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n");
    out
}
