/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the default leaf block
/// when no other block opener matches. Lines are joined with `\n`
/// and inline parsing is applied to the content when rendering.
pub struct Paragraph;

impl Paragraph {
    pub const LINE_BREAK: &str = "\n";
}
