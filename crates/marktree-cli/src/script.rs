//! Line-based edit scripts.
//!
//! ```text
//! # comments and blank lines are ignored
//! cursor 0 2        # child indices, then the offset
//! insert hello\nworld
//! enter
//! backspace
//! delete
//! format bold
//! select-all
//! delete-range
//! ```

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};
use marktree_engine::{Cmd, CursorPath, Document, InlineFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Cursor(CursorPath),
    Apply(Cmd),
}

pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (n, line) in script.lines().enumerate() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("script line {}", n + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<Step> {
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let cmd = match word {
        "cursor" => return parse_cursor(rest).map(Step::Cursor),
        "insert" => Cmd::InsertText {
            text: unescape(rest),
        },
        "enter" => Cmd::Enter,
        "backspace" => Cmd::Backspace,
        "delete" => Cmd::Delete,
        "delete-range" => Cmd::DeleteRange,
        "select-all" => Cmd::SelectAll,
        "format" => {
            let name = rest.trim();
            let format = InlineFormat::from_name(name)
                .ok_or_else(|| anyhow!("unknown format '{name}'"))?;
            Cmd::ApplyFormat { format }
        }
        other => bail!("unknown command '{other}'"),
    };
    Ok(Step::Apply(cmd))
}

fn parse_cursor(rest: &str) -> Result<CursorPath> {
    let mut numbers = rest
        .split_whitespace()
        .take_while(|word| !word.starts_with('#'))
        .map(|word| {
            word.parse::<usize>()
                .with_context(|| format!("'{word}' is not a number"))
        })
        .collect::<Result<Vec<_>>>()?;
    if numbers.len() < 2 {
        bail!("cursor needs at least one index and an offset");
    }
    let offset = numbers.pop().unwrap_or_default();
    Ok(CursorPath {
        indices: numbers,
        offset,
    })
}

/// `\n`, `\t` and `\\` escapes in inserted text.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Run every step against `doc`. Commands that change nothing are logged
/// and skipped; a cursor that addresses nothing stops the script.
pub fn run_script(doc: &mut Document, steps: Vec<Step>) -> Result<()> {
    for step in steps {
        match step {
            Step::Cursor(path) => {
                doc.set_cursor_path(&path)
                    .with_context(|| format!("placing cursor at {path:?}"))?;
            }
            Step::Apply(cmd) => {
                let name = format!("{cmd:?}");
                match doc.apply(cmd) {
                    Some(patch) => debug!(
                        "{name}: version {}, {} updated, {} added, {} removed",
                        patch.version,
                        patch.hints.updated.len(),
                        patch.hints.added.len(),
                        patch.hints.removed.len()
                    ),
                    None => info!("{name} had no effect"),
                }
            }
        }
    }
    Ok(())
}
