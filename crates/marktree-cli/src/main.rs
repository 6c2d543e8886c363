mod script;

use anyhow::{Context, Result};
use log::LevelFilter;
use marktree_config::Config;
use marktree_engine::{Document, EditorOptions, SyntaxNode};
use std::{env, path::PathBuf, process, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Tree,
    Markdown,
    Html,
    Text,
    Json,
    Check,
}

impl Output {
    fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--tree" => Some(Output::Tree),
            "--markdown" => Some(Output::Markdown),
            "--html" => Some(Output::Html),
            "--text" => Some(Output::Text),
            "--json" => Some(Output::Json),
            "--check" => Some(Output::Check),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Mode {
    Show(Output),
    Edit(PathBuf),
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <file.md> [--tree | --markdown | --html | --text | --json | --check]");
    eprintln!("       {program} <file.md> --edit <script>");
    process::exit(1);
}

fn parse_args(args: &[String]) -> Option<(PathBuf, Mode)> {
    match args {
        [_, file] => Some((PathBuf::from(file), Mode::Show(Output::Tree))),
        [_, file, flag] => Output::from_flag(flag).map(|o| (PathBuf::from(file), Mode::Show(o))),
        [_, file, flag, script] if flag == "--edit" => {
            Some((PathBuf::from(file), Mode::Edit(PathBuf::from(script))))
        }
        _ => None,
    }
}

fn init_logging(config: &Config) {
    let level = config
        .log_level
        .as_deref()
        .and_then(|level| LevelFilter::from_str(level).ok())
        .unwrap_or(LevelFilter::Info);
    // RUST_LOG wins over the configured level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Indented dump of a node list: id, kind, source lines and content.
fn dump_tree(nodes: &[SyntaxNode], depth: usize, out: &mut String) {
    for node in nodes {
        out.push_str(&format!(
            "{}{} {} [{}-{}] {:?}\n",
            "  ".repeat(depth),
            node.id(),
            node.type_name(),
            node.start_line,
            node.end_line,
            node.content
        ));
        dump_tree(&node.children, depth + 1, out);
    }
}

/// Byte offset of the first difference between two strings.
fn first_difference(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .position(|(x, y)| x != y)
        .unwrap_or(a.len().min(b.len()))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("marktree-cli", String::as_str);
    let Some((file, mode)) = parse_args(&args) else {
        usage(program);
    };

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    init_logging(&config);
    log::debug!("config: {config:?}");

    let bytes = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let original = String::from_utf8_lossy(&bytes).into_owned();
    let mut doc = Document::from_bytes(&bytes)
        .with_context(|| format!("parsing {}", file.display()))?
        .with_options(EditorOptions {
            source_mode: config.editor.source_mode,
        });
    log::info!(
        "{}: {} nodes",
        file.display(),
        doc.tree().len()
    );

    match mode {
        Mode::Edit(script_path) => {
            let script_path = config.resolve_script(&script_path);
            let script = std::fs::read_to_string(&script_path)
                .with_context(|| format!("reading script {}", script_path.display()))?;
            let steps = script::parse_script(&script)?;
            script::run_script(&mut doc, steps)?;
            print!("{}", doc.to_markdown());
        }
        Mode::Show(Output::Tree) => {
            let mut out = String::new();
            dump_tree(&doc.tree().children, 0, &mut out);
            print!("{out}");
        }
        Mode::Show(Output::Markdown) => print!("{}", doc.to_markdown()),
        Mode::Show(Output::Html) => print!("{}", doc.to_html()),
        Mode::Show(Output::Text) => println!("{}", doc.to_bare_text()),
        Mode::Show(Output::Json) => {
            println!("{}", serde_json::to_string_pretty(doc.tree())?);
        }
        Mode::Show(Output::Check) => {
            let markdown = doc.to_markdown();
            if markdown == original {
                println!("{}: round-trip ok", file.display());
            } else {
                println!(
                    "{}: round-trip differs at byte {}",
                    file.display(),
                    first_difference(&markdown, &original)
                );
                process::exit(1);
            }
        }
    }
    Ok(())
}
