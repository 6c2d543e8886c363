use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Process-wide counter; ids are never reused.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable handle for a [`SyntaxNode`], unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// How a list item is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMarker {
    /// `-`, `*` or `+`
    Bullet(char),
    /// `N.` where N is the literal number written in the source
    Number(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListAttrs {
    pub marker: ListMarker,
    /// Leading spaces as written. Every two make one nesting level.
    pub spaces: usize,
    /// Checkbox mark as written (`' '`, `'x'` or `'X'`), `None` without one.
    pub checkbox: Option<char>,
}

impl ListAttrs {
    pub const INDENT_WIDTH: usize = 2;

    /// Nesting level, with odd leftover spaces rounded down.
    pub fn indent(&self) -> usize {
        self.spaces / Self::INDENT_WIDTH
    }

    pub fn checked(&self) -> Option<bool> {
        self.checkbox.map(|mark| mark != ' ')
    }

    pub fn ordered(&self) -> bool {
        matches!(self.marker, ListMarker::Number(_))
    }

    pub fn number(&self) -> Option<u64> {
        match self.marker {
            ListMarker::Number(n) => Some(n),
            ListMarker::Bullet(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageAttrs {
    pub url: String,
    pub alt: String,
    /// Link target for `[![alt](src)](href)`.
    pub href: Option<String>,
    pub style: Option<String>,
    /// The full source line when the image was written as an `<img>` tag.
    pub html: Option<String>,
}

/// Body layout of an html block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "shape")]
pub enum HtmlShape {
    /// `<!-- ... -->`, stored whole in `opening_tag`.
    Comment,
    /// A tag with no closing counterpart, e.g. `<link ...>`.
    Void,
    /// `<tag>inline</tag>` on one line; one bare-text paragraph child.
    Inline,
    /// Multi-line container whose body is parsed as a nested document.
    Container { trailing: Trailing },
    /// Body kept byte for byte and never parsed.
    Raw { content: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlAttrs {
    /// Lowercased tag name, `!--` for comments.
    pub tag_name: String,
    pub opening_tag: String,
    pub closing_tag: String,
    pub shape: HtmlShape,
}

impl HtmlAttrs {
    pub fn raw_content(&self) -> Option<&str> {
        match &self.shape {
            HtmlShape::Raw { content } => Some(content),
            _ => None,
        }
    }
}

/// Node type together with the attributes that apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NodeKind {
    Heading {
        level: u8,
        /// Number of `#` written; may exceed six.
        marker_len: usize,
    },
    Paragraph {
        /// Literal single line inside an inline html block, never reparsed.
        bare_text: bool,
    },
    BlockQuote {
        /// Per content line, whether its `>` was followed by a space. Lines
        /// past the end are written `> `, or `>` when empty.
        spaced: Vec<bool>,
    },
    CodeBlock {
        language: String,
        fence_count: usize,
        /// False when the fence ran to the end of input.
        closed: bool,
        /// The body is one empty line rather than no line at all. Only
        /// matters while the content is empty.
        blank_body: bool,
    },
    ListItem(ListAttrs),
    HorizontalRule,
    Image(ImageAttrs),
    Table,
    HtmlBlock(HtmlAttrs),
}

impl NodeKind {
    pub fn paragraph() -> Self {
        NodeKind::Paragraph { bare_text: false }
    }

    pub fn block_quote() -> Self {
        NodeKind::BlockQuote { spaced: Vec::new() }
    }

    /// Type name as used by renderers: `heading1`..`heading6`, `code-block`, ...
    pub fn type_name(&self) -> String {
        match self {
            NodeKind::Heading { level, .. } => format!("heading{level}"),
            NodeKind::Paragraph { .. } => "paragraph".into(),
            NodeKind::BlockQuote { .. } => "blockquote".into(),
            NodeKind::CodeBlock { .. } => "code-block".into(),
            NodeKind::ListItem(_) => "list-item".into(),
            NodeKind::HorizontalRule => "horizontal-rule".into(),
            NodeKind::Image(_) => "image".into(),
            NodeKind::Table => "table".into(),
            NodeKind::HtmlBlock(_) => "html-block".into(),
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, NodeKind::Paragraph { .. })
    }

    pub fn is_bare_text(&self) -> bool {
        matches!(self, NodeKind::Paragraph { bare_text: true })
    }

    /// Kinds whose `content` the user edits directly as text.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            NodeKind::Heading { .. }
                | NodeKind::Paragraph { .. }
                | NodeKind::BlockQuote { .. }
                | NodeKind::CodeBlock { .. }
                | NodeKind::ListItem(_)
        )
    }

    /// Text kinds that take part in boundary merges.
    pub fn is_mergeable(&self) -> bool {
        matches!(
            self,
            NodeKind::Heading { .. }
                | NodeKind::Paragraph { bare_text: false }
                | NodeKind::BlockQuote { .. }
                | NodeKind::ListItem(_)
        )
    }
}

/// Line breaks after the last node of a sibling list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trailing {
    pub breaks: usize,
    /// Whitespace before each break and, as entry `breaks`, after the last
    /// one. Missing entries are empty.
    pub fill: Vec<String>,
}

impl Trailing {
    pub fn breaks(breaks: usize) -> Self {
        Trailing {
            breaks,
            fill: Vec::new(),
        }
    }
}

/// Entry `i` of a whitespace fill, empty when absent.
pub fn fill_at(fill: &[String], i: usize) -> &str {
    fill.get(i).map_or("", String::as_str)
}

/// A fill whose lines are all empty is stored as nothing.
pub(crate) fn compact_fill(fill: Vec<String>) -> Vec<String> {
    if fill.iter().all(String::is_empty) {
        Vec::new()
    } else {
        fill
    }
}

/// One block of the document tree.
///
/// Ids are unique across the process, so there is no `Clone`.
/// [`SyntaxNode::duplicate`] copies under fresh ids.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    id: NodeId,
    pub kind: NodeKind,
    pub content: String,
    pub children: Vec<SyntaxNode>,
    pub start_line: usize,
    pub end_line: usize,
    /// Empty lines between this node and whatever precedes it.
    pub blank_lines: usize,
    /// Whitespace written on those lines, one entry per line.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blank_fill: Vec<String>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, content: impl Into<String>) -> Self {
        SyntaxNode {
            id: NodeId::next(),
            kind,
            content: content.into(),
            children: Vec::new(),
            start_line: 0,
            end_line: 0,
            blank_lines: 0,
            blank_fill: Vec::new(),
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::new(NodeKind::paragraph(), content)
    }

    pub fn with_lines(mut self, start: usize, end: usize) -> Self {
        self.start_line = start;
        self.end_line = end;
        self
    }

    pub fn with_blank_lines(mut self, blank_lines: usize) -> Self {
        self.blank_lines = blank_lines;
        self
    }

    pub fn with_blank_fill(mut self, fill: Vec<String>) -> Self {
        self.blank_fill = compact_fill(fill);
        self
    }

    /// Bytes the blank lines before this node take up in markdown.
    pub fn gap_len(&self) -> usize {
        self.blank_lines
            + (0..self.blank_lines)
                .map(|i| fill_at(&self.blank_fill, i).len())
                .sum::<usize>()
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn type_name(&self) -> String {
        self.kind.type_name()
    }

    /// Copy of this node and its descendants under fresh ids.
    pub fn duplicate(&self) -> SyntaxNode {
        SyntaxNode {
            id: NodeId::next(),
            kind: self.kind.clone(),
            content: self.content.clone(),
            children: self.children.iter().map(SyntaxNode::duplicate).collect(),
            start_line: self.start_line,
            end_line: self.end_line,
            blank_lines: self.blank_lines,
            blank_fill: self.blank_fill.clone(),
        }
    }

    /// Cut `range` out of the content. A quote drops the spacing of the
    /// lines whose breaks went with it.
    pub(crate) fn cut_content(&mut self, range: std::ops::Range<usize>) {
        if let NodeKind::BlockQuote { spaced } = &mut self.kind {
            let line = self.content[..range.start].matches('\n').count();
            let joined = self.content[range.clone()].matches('\n').count();
            let from = (line + 1).min(spaced.len());
            let to = (line + 1 + joined).min(spaced.len());
            spaced.drain(from..to);
        }
        self.content.replace_range(range, "");
    }

    /// Move this node's identity onto `other`, which replaces it in place.
    pub(crate) fn adopt(&self, mut other: SyntaxNode) -> SyntaxNode {
        other.id = self.id;
        other.blank_lines = self.blank_lines;
        other.blank_fill = self.blank_fill.clone();
        other
    }

    /// Shift this node's and its descendants' source lines.
    pub(crate) fn offset_lines(&mut self, by: usize) {
        self.start_line += by;
        self.end_line += by;
        for child in &mut self.children {
            child.offset_lines(by);
        }
    }

    /// Pre-order iterator over this node and its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &SyntaxNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn display_id() {
        let id = NodeId(42);
        assert_eq!(id.to_string(), "n42");
    }

    #[test]
    fn type_names() {
        let heading = NodeKind::Heading {
            level: 3,
            marker_len: 3,
        };
        assert_eq!(heading.type_name(), "heading3");
        assert_eq!(NodeKind::paragraph().type_name(), "paragraph");
        let code = NodeKind::CodeBlock {
            language: String::new(),
            fence_count: 3,
            closed: true,
            blank_body: false,
        };
        assert_eq!(code.type_name(), "code-block");
    }

    #[test]
    fn list_attrs_accessors() {
        let ordered = ListAttrs {
            marker: ListMarker::Number(7),
            spaces: 0,
            checkbox: Some('X'),
        };
        assert!(ordered.ordered());
        assert_eq!(ordered.number(), Some(7));
        assert_eq!(ordered.checked(), Some(true));

        let bullet = ListAttrs {
            marker: ListMarker::Bullet('-'),
            spaces: 3,
            checkbox: Some(' '),
        };
        assert!(!bullet.ordered());
        assert_eq!(bullet.number(), None);
        assert_eq!(bullet.indent(), 1);
        assert_eq!(bullet.checked(), Some(false));
    }

    #[test]
    fn duplicate_issues_fresh_ids() {
        let inner = SyntaxNode::paragraph("b");
        let outer = SyntaxNode::new(NodeKind::block_quote(), "a")
            .with_blank_lines(1)
            .with_children(vec![inner]);

        let copy = outer.duplicate();

        assert_ne!(copy.id(), outer.id());
        assert_ne!(copy.children[0].id(), outer.children[0].id());
        assert_eq!(copy.kind, outer.kind);
        assert_eq!(copy.content, "a");
        assert_eq!(copy.children[0].content, "b");
        assert_eq!(copy.blank_lines, 1);
    }

    #[test]
    fn gap_counts_whitespace_lines() {
        let node = SyntaxNode::paragraph("x")
            .with_blank_lines(2)
            .with_blank_fill(vec!["  ".into(), String::new()]);
        assert_eq!(node.gap_len(), 4);
        let plain = SyntaxNode::paragraph("x")
            .with_blank_lines(2)
            .with_blank_fill(vec![String::new(), String::new()]);
        assert!(plain.blank_fill.is_empty());
        assert_eq!(plain.gap_len(), 2);
    }

    #[test]
    fn adopt_keeps_identity_and_spacing() {
        let old = SyntaxNode::paragraph("#")
            .with_blank_lines(2)
            .with_blank_fill(vec![" ".into()]);
        let new = SyntaxNode::new(
            NodeKind::Heading {
                level: 1,
                marker_len: 1,
            },
            "",
        );
        let replaced = old.adopt(new);
        assert_eq!(replaced.id(), old.id());
        assert_eq!(replaced.blank_lines, 2);
        assert_eq!(replaced.blank_fill, vec![" ".to_string()]);
        assert_eq!(replaced.type_name(), "heading1");
    }

    #[test]
    fn descendants_are_pre_order() {
        let inner = SyntaxNode::paragraph("b");
        let inner_id = inner.id();
        let outer = SyntaxNode::paragraph("a").with_children(vec![inner]);
        let ids: Vec<_> = outer.descendants().map(|n| n.id()).collect();
        assert_eq!(ids, vec![outer.id(), inner_id]);
    }
}
