//! Cell model derived on demand from a table node's raw content.
//!
//! The parser stores tables opaquely; this grid is rebuilt whenever a cell
//! is addressed or the table is rendered.

use std::ops::Range;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    /// Cell text with surrounding whitespace trimmed.
    pub text: String,
    /// Byte range of `text` inside the table content.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableGrid {
    /// Rows without the separator row.
    pub rows: Vec<Vec<TableCell>>,
    /// Number of rows above the separator row (0 when there is none).
    pub header_rows: usize,
    pub alignments: Vec<Option<Alignment>>,
}

impl TableGrid {
    pub fn parse(content: &str) -> Self {
        let mut rows = Vec::new();
        let mut header_rows = 0;
        let mut alignments = Vec::new();
        let mut line_start = 0;

        for line in content.split('\n') {
            if is_separator_row(line) && header_rows == 0 && !rows.is_empty() {
                header_rows = rows.len();
                alignments = cell_segments(line)
                    .into_iter()
                    .map(|seg| alignment_of(line[seg].trim()))
                    .collect();
            } else {
                let cells = cell_segments(line)
                    .into_iter()
                    .map(|seg| trimmed_cell(line, seg, line_start))
                    .collect();
                rows.push(cells);
            }
            line_start += line.len() + 1;
        }

        TableGrid {
            rows,
            header_rows,
            alignments,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row)?.get(col)
    }

    pub fn alignment(&self, col: usize) -> Option<Alignment> {
        self.alignments.get(col).copied().flatten()
    }

    /// Markdown for a new row of `cols` empty cells.
    pub fn empty_row(cols: usize) -> String {
        let mut row = String::from("|");
        for _ in 0..cols.max(1) {
            row.push_str("  |");
        }
        row
    }
}

/// `| --- | :-: |` style row: only dashes, colons, pipes and whitespace.
pub fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|' | ' ' | '\t'))
}

fn alignment_of(marker: &str) -> Option<Alignment> {
    match (marker.starts_with(':'), marker.ends_with(':') && marker.len() > 1) {
        (true, true) => Some(Alignment::Center),
        (false, true) => Some(Alignment::Right),
        (true, false) => Some(Alignment::Left),
        (false, false) => None,
    }
}

/// Byte ranges of each cell between unescaped pipes.
fn cell_segments(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let pipes: Vec<usize> = (0..bytes.len())
        .filter(|&i| bytes[i] == b'|' && (i == 0 || bytes[i - 1] != b'\\'))
        .collect();

    let Some((&first, &last)) = pipes.first().zip(pipes.last()) else {
        return if line.trim().is_empty() {
            Vec::new()
        } else {
            vec![0..line.len()]
        };
    };

    let mut segments = Vec::new();
    if !line[..first].trim().is_empty() {
        segments.push(0..first);
    }
    for pair in pipes.windows(2) {
        segments.push(pair[0] + 1..pair[1]);
    }
    if !line[last + 1..].trim().is_empty() {
        segments.push(last + 1..line.len());
    }
    segments
}

fn trimmed_cell(line: &str, seg: Range<usize>, line_start: usize) -> TableCell {
    let raw = &line[seg.clone()];
    let text = raw.trim();
    let start = if text.is_empty() {
        seg.start + raw.len().min(1)
    } else {
        seg.start + (raw.len() - raw.trim_start().len())
    };
    TableCell {
        text: text.to_string(),
        range: line_start + start..line_start + start + text.len(),
    }
}
