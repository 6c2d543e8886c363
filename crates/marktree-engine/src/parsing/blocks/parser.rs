use log::trace;
use marktree_syntax::TokenCursor;

use crate::tree::node::compact_fill;
use crate::tree::{HtmlShape, ImageAttrs, NodeKind, SyntaxNode, Trailing};

use super::kinds::{
    BlockQuote, CodeFence, FenceOpen, Heading, HorizontalRule, HtmlBlock, HtmlBody, HtmlPlan,
    ImageBlock, ListItem, ListStart, Paragraph, Table,
};

/// Sibling blocks plus the line breaks that followed the last one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Blocks {
    pub nodes: Vec<SyntaxNode>,
    pub trailing: Trailing,
}

/// Block opener found by lookahead. Nothing has been consumed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockStart {
    Heading(usize),
    CodeFence(FenceOpen),
    BlockQuote,
    List(ListStart),
    HorizontalRule,
    Image(ImageAttrs),
    Html(HtmlPlan),
    Table,
}

impl BlockStart {
    fn name(&self) -> &'static str {
        match self {
            BlockStart::Heading(_) => "heading",
            BlockStart::CodeFence(_) => "code-fence",
            BlockStart::BlockQuote => "blockquote",
            BlockStart::List(_) => "list-item",
            BlockStart::HorizontalRule => "horizontal-rule",
            BlockStart::Image(_) => "image",
            BlockStart::Html(_) => "html-block",
            BlockStart::Table => "table",
        }
    }
}

/// Single pass block parser over a [`TokenCursor`].
///
/// Each block consumes its lines up to, but not including, the terminator of
/// its last line. Blank lines between blocks are stored on the following
/// node together with any whitespace written on them.
pub struct BlockParser<'a> {
    cursor: TokenCursor<'a>,
}

impl<'a> BlockParser<'a> {
    pub fn new(input: &'a str) -> Self {
        BlockParser {
            cursor: TokenCursor::new(input),
        }
    }

    pub fn parse(mut self) -> Blocks {
        let mut nodes: Vec<SyntaxNode> = Vec::new();
        let mut pending = self.skip_blank_lines();
        while !self.cursor.at_end() {
            let (breaks, mut fill) = pending;
            // after the first block, one of the counted breaks ends the previous line
            let blank_lines = if nodes.is_empty() {
                breaks
            } else {
                if !fill.is_empty() {
                    fill.remove(0);
                }
                breaks.saturating_sub(1)
            };
            let node = self
                .parse_block()
                .with_blank_lines(blank_lines)
                .with_blank_fill(fill);
            nodes.push(node);
            pending = self.skip_blank_lines();
        }
        let (breaks, fill) = pending;
        Blocks {
            nodes,
            trailing: Trailing {
                breaks,
                fill: compact_fill(fill),
            },
        }
    }

    /// Consume blank and whitespace-only lines. Returns how many line breaks
    /// were consumed and the text of each consumed line; a whitespace-only
    /// last line without a break adds one extra entry.
    fn skip_blank_lines(&mut self) -> (usize, Vec<String>) {
        let mut breaks = 0;
        let mut fill = Vec::new();
        while self.cursor.peek_line(0).is_some_and(|line| line.is_blank()) {
            fill.push(self.cursor.take_line_text());
            if !self.cursor.eat_newline() {
                break;
            }
            breaks += 1;
        }
        (breaks, fill)
    }

    /// First matching block opener on line `k`, in dispatch order.
    pub fn classify(&self, k: usize) -> Option<BlockStart> {
        let line = self.cursor.peek_line(k)?;
        if let Some(marker_len) = Heading::detect(&line) {
            return Some(BlockStart::Heading(marker_len));
        }
        if let Some(open) = CodeFence::detect(&line) {
            return Some(BlockStart::CodeFence(open));
        }
        if BlockQuote::detect(&line) {
            return Some(BlockStart::BlockQuote);
        }
        if let Some(start) = ListItem::detect_unordered(&line) {
            return Some(BlockStart::List(start));
        }
        if let Some(start) = ListItem::detect_ordered(&line) {
            return Some(BlockStart::List(start));
        }
        if HorizontalRule::detect(&line) {
            return Some(BlockStart::HorizontalRule);
        }
        let text = line.text();
        if let Some(img) = ImageBlock::from_img_tag(&text) {
            return Some(BlockStart::Image(img));
        }
        if let Some(plan) = HtmlBlock::plan(&self.cursor, k) {
            return Some(BlockStart::Html(plan));
        }
        if Table::detect(&line) {
            return Some(BlockStart::Table);
        }
        ImageBlock::from_markdown(&text).map(BlockStart::Image)
    }

    fn parse_block(&mut self) -> SyntaxNode {
        let start = self.cursor.line();
        let opener = self.classify(0);
        trace!(
            "line {start}: {}",
            opener.as_ref().map_or("paragraph", BlockStart::name)
        );
        let node = match opener {
            Some(BlockStart::Heading(marker_len)) => self.heading(marker_len),
            Some(BlockStart::CodeFence(open)) => self.code_block(open),
            Some(BlockStart::BlockQuote) => self.block_quote(),
            Some(BlockStart::List(start)) => self.list_item(start),
            Some(BlockStart::HorizontalRule) => {
                SyntaxNode::new(NodeKind::HorizontalRule, self.cursor.take_line_text())
            }
            Some(BlockStart::Image(img)) => {
                self.cursor.bump_line();
                let alt = img.alt.clone();
                SyntaxNode::new(NodeKind::Image(img), alt)
            }
            Some(BlockStart::Html(plan)) => self.html_block(plan, start),
            Some(BlockStart::Table) => self.table(),
            None => self.paragraph(),
        };
        node.with_lines(start, self.cursor.line())
    }

    /// Consume `n` lines, leaving the cursor on the last line's terminator.
    fn consume_lines(&mut self, n: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(n);
        for i in 0..n {
            if i > 0 {
                self.cursor.eat_newline();
            }
            lines.push(self.cursor.take_line_text());
        }
        lines
    }

    fn heading(&mut self, marker_len: usize) -> SyntaxNode {
        let content = self.cursor.bump_line().text_from(marker_len + 1);
        SyntaxNode::new(
            NodeKind::Heading {
                level: Heading::level(marker_len),
                marker_len,
            },
            content,
        )
    }

    fn code_block(&mut self, open: FenceOpen) -> SyntaxNode {
        let mut body = Vec::new();
        let mut closed = false;
        while let Some(line) = self.cursor.peek_line(body.len() + 1) {
            if CodeFence::closes(&line, open.count) {
                closed = true;
                break;
            }
            body.push(line.text());
        }
        if !closed {
            // an unterminated fence leaves its trailing empty lines to the document
            while body.last().is_some_and(String::is_empty) {
                body.pop();
            }
        }
        self.consume_lines(body.len() + 1 + usize::from(closed));
        let blank_body = body.len() == 1 && body[0].is_empty();
        SyntaxNode::new(
            NodeKind::CodeBlock {
                language: open.language,
                fence_count: open.count,
                closed,
                blank_body,
            },
            body.join("\n"),
        )
    }

    fn block_quote(&mut self) -> SyntaxNode {
        let mut lines = Vec::new();
        let mut spaced = Vec::new();
        while let Some(line) = self.cursor.peek_line(lines.len()) {
            if !BlockQuote::detect(&line) {
                break;
            }
            spaced.push(BlockQuote::spaced(&line));
            lines.push(BlockQuote::strip(&line));
        }
        self.consume_lines(lines.len());
        SyntaxNode::new(NodeKind::BlockQuote { spaced }, lines.join("\n"))
    }

    fn list_item(&mut self, start: ListStart) -> SyntaxNode {
        let content = self.cursor.bump_line().text_from(start.content_from);
        SyntaxNode::new(NodeKind::ListItem(start.attrs), content)
    }

    fn table(&mut self) -> SyntaxNode {
        let mut n = 1;
        while self
            .cursor
            .peek_line(n)
            .is_some_and(|line| Table::continues(&line))
        {
            n += 1;
        }
        let rows = self.consume_lines(n);
        SyntaxNode::new(NodeKind::Table, rows.join("\n"))
    }

    fn html_block(&mut self, plan: HtmlPlan, start: usize) -> SyntaxNode {
        let HtmlPlan {
            mut attrs,
            lines,
            body,
        } = plan;
        self.consume_lines(lines);
        let children = match body {
            HtmlBody::None => Vec::new(),
            HtmlBody::Inline(text) => vec![
                SyntaxNode::new(NodeKind::Paragraph { bare_text: true }, text)
                    .with_lines(start, start),
            ],
            HtmlBody::Nested(markdown) => {
                let blocks = BlockParser::new(&markdown).parse();
                attrs.shape = HtmlShape::Container {
                    trailing: blocks.trailing,
                };
                let mut nodes = blocks.nodes;
                for node in &mut nodes {
                    node.offset_lines(start + 1);
                }
                nodes
            }
        };
        SyntaxNode::new(NodeKind::HtmlBlock(attrs), String::new()).with_children(children)
    }

    fn paragraph(&mut self) -> SyntaxNode {
        let mut n = 1;
        while self
            .cursor
            .peek_line(n)
            .is_some_and(|line| !line.is_blank())
            && self.classify(n).is_none()
        {
            n += 1;
        }
        let lines = self.consume_lines(n);
        SyntaxNode::paragraph(lines.join(Paragraph::LINE_BREAK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{HtmlAttrs, ListMarker, blocks_markdown};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(input: &str) -> Blocks {
        BlockParser::new(input).parse()
    }

    fn kinds(input: &str) -> Vec<String> {
        parse(input).nodes.iter().map(SyntaxNode::type_name).collect()
    }

    #[rstest]
    #[case("# Title", &["heading1"])]
    #[case("####### Seven", &["heading6"])]
    #[case("#tag", &["paragraph"])]
    #[case("```\ncode\n```", &["code-block"])]
    #[case("> quote\n> more", &["blockquote"])]
    #[case("- a\n- b", &["list-item", "list-item"])]
    #[case("1. a\n2. b", &["list-item", "list-item"])]
    #[case("---", &["horizontal-rule"])]
    #[case("  <img src=\"a.png\">", &["image"])]
    #[case("<div>x</div>", &["html-block"])]
    #[case("| a |\n|---|", &["table"])]
    #[case("![a](b.png)", &["image"])]
    #[case("[![a](b.png)](c)", &["image"])]
    #[case("text ![a](b.png)", &["paragraph"])]
    #[case("para\n# head", &["paragraph", "heading1"])]
    #[case("a\nb\n\nc", &["paragraph", "paragraph"])]
    #[case("<span>x</span>", &["paragraph"])]
    fn dispatch(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(kinds(input), expected);
    }

    #[test]
    fn paragraph_joins_lines() {
        let blocks = parse("one\ntwo\n\nthree");
        assert_eq!(blocks.nodes[0].content, "one\ntwo");
        assert_eq!(blocks.nodes[0].end_line, 1);
        assert_eq!(blocks.nodes[1].start_line, 3);
        assert_eq!(blocks.nodes[1].blank_lines, 1);
    }

    #[test]
    fn blank_line_accounting() {
        let blocks = parse("\n\n# A\n\n\nB\n\n");
        let blank: Vec<usize> = blocks.nodes.iter().map(|n| n.blank_lines).collect();
        assert_eq!(blank, vec![2, 2]);
        assert_eq!(blocks.trailing, Trailing::breaks(2));
        assert_eq!(blocks_markdown(&blocks.nodes, &blocks.trailing), "\n\n# A\n\n\nB\n\n");
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse(""), Blocks::default());
        assert_eq!(parse("\n").trailing, Trailing::breaks(1));
    }

    #[test]
    fn fence_length_is_significant() {
        let blocks = parse("````\n```\nnested\n```\n````");
        assert_eq!(blocks.nodes.len(), 1);
        let node = &blocks.nodes[0];
        assert_eq!(node.content, "```\nnested\n```");
        assert_eq!(
            node.kind,
            NodeKind::CodeBlock {
                language: String::new(),
                fence_count: 4,
                closed: true,
                blank_body: false,
            }
        );
        assert_eq!(node.end_line, 4);
    }

    #[test]
    fn fence_body_is_not_parsed() {
        let blocks = parse("```md\n# not a heading\n\n- nor a list\n```\nafter");
        assert_eq!(blocks.nodes.len(), 2);
        assert_eq!(blocks.nodes[0].content, "# not a heading\n\n- nor a list");
        assert_eq!(blocks.nodes[1].blank_lines, 0);
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let blocks = parse("```\ncode\n\n");
        let node = &blocks.nodes[0];
        assert_eq!(node.content, "code");
        assert!(matches!(node.kind, NodeKind::CodeBlock { closed: false, .. }));
        assert_eq!(blocks.trailing, Trailing::breaks(2));
    }

    #[rstest]
    #[case("```\n\n```", "", true)]
    #[case("```\n```", "", false)]
    #[case("```\n\n\n```", "\n", false)]
    fn empty_fence_bodies_differ(
        #[case] input: &str,
        #[case] content: &str,
        #[case] blank: bool,
    ) {
        let blocks = parse(input);
        let node = &blocks.nodes[0];
        assert_eq!(node.content, content);
        assert!(matches!(
            node.kind,
            NodeKind::CodeBlock { blank_body, .. } if blank_body == blank
        ));
        assert_eq!(blocks_markdown(&blocks.nodes, &blocks.trailing), input);
    }

    #[test]
    fn quote_spacing_is_per_line() {
        let blocks = parse(">a\n> b\n>");
        let node = &blocks.nodes[0];
        assert_eq!(node.content, "a\nb\n");
        assert_eq!(
            node.kind,
            NodeKind::BlockQuote {
                spaced: vec![false, true, false]
            }
        );
    }

    #[test]
    fn list_attributes() {
        let blocks = parse("- [x] done\n  3. [ ] nested");
        let attrs: Vec<_> = blocks
            .nodes
            .iter()
            .map(|n| match &n.kind {
                NodeKind::ListItem(a) => (a.marker, a.indent(), a.checkbox, n.content.clone()),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            attrs,
            vec![
                (ListMarker::Bullet('-'), 0, Some('x'), "done".to_string()),
                (ListMarker::Number(3), 1, Some(' '), "nested".to_string()),
            ]
        );
    }

    #[test]
    fn paragraph_stops_at_block_opener() {
        let blocks = parse("text\n> quote\n```\ncode\n```");
        assert_eq!(kinds_of(&blocks), vec!["paragraph", "blockquote", "code-block"]);
    }

    fn kinds_of(blocks: &Blocks) -> Vec<String> {
        blocks.nodes.iter().map(SyntaxNode::type_name).collect()
    }

    #[test]
    fn table_absorbs_rows() {
        let blocks = parse("| a | b |\n| --- | :-: |\n| 1 | 2 |\nafter");
        assert_eq!(kinds_of(&blocks), vec!["table", "paragraph"]);
        assert_eq!(blocks.nodes[0].content, "| a | b |\n| --- | :-: |\n| 1 | 2 |");
    }

    #[test]
    fn inline_html_has_bare_text_child() {
        let blocks = parse("<p>Hello *world*</p>");
        let node = &blocks.nodes[0];
        assert_eq!(node.children.len(), 1);
        assert!(node.children[0].kind.is_bare_text());
        assert_eq!(node.children[0].content, "Hello *world*");
    }

    #[test]
    fn container_body_is_parsed_with_line_offsets() {
        let blocks = parse("intro\n\n<section>\n\n# Inside\n\n- item\n\n</section>");
        let html = &blocks.nodes[1];
        let NodeKind::HtmlBlock(HtmlAttrs { shape, .. }) = &html.kind else {
            panic!("expected html block");
        };
        assert_eq!(
            shape,
            &HtmlShape::Container {
                trailing: Trailing::breaks(2)
            }
        );
        assert_eq!(html.start_line, 2);
        assert_eq!(html.end_line, 8);
        let children: Vec<_> = html
            .children
            .iter()
            .map(|c| (c.type_name(), c.start_line, c.blank_lines))
            .collect();
        assert_eq!(
            children,
            vec![("heading1".to_string(), 4, 1), ("list-item".to_string(), 6, 1)]
        );
    }

    #[test]
    fn comment_spans_lines() {
        let blocks = parse("<!-- a\n\nb -->\ntext");
        assert_eq!(kinds_of(&blocks), vec!["html-block", "paragraph"]);
        assert_eq!(blocks.nodes[1].start_line, 3);
    }

    #[test]
    fn crlf_parses_like_lf() {
        let blocks = parse("# A\r\n\r\nb");
        assert_eq!(kinds_of(&blocks), vec!["heading1", "paragraph"]);
        assert_eq!(blocks.nodes[1].blank_lines, 1);
    }

    #[test]
    fn whitespace_only_lines_are_blank() {
        let blocks = parse("a\n   \nb");
        assert_eq!(blocks.nodes.len(), 2);
        assert_eq!(blocks.nodes[1].blank_lines, 1);
        assert_eq!(blocks.nodes[1].blank_fill, vec!["   ".to_string()]);
    }

    #[rstest]
    #[case("  \n# A")]
    #[case("a\n \n\t\nb")]
    #[case("a\n   ")]
    #[case("a\n  \n")]
    #[case(" \t ")]
    fn blank_line_whitespace_is_kept(#[case] input: &str) {
        let blocks = parse(input);
        assert_eq!(blocks_markdown(&blocks.nodes, &blocks.trailing), input);
    }

    #[test]
    fn trailing_whitespace_line() {
        let blocks = parse("a\n   ");
        assert_eq!(blocks.trailing.breaks, 1);
        assert_eq!(blocks.trailing.fill, vec![String::new(), "   ".to_string()]);
    }
}
