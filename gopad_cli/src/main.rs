//! Gopad - Go highlighting and outline inspector.
//!
//! Usage: gopad <FILE|DIR>
//!
//! A file argument prints its highlight layers; a directory argument
//! prints the package outline the navigator pane would show.

use gopad_core::Highlighter;
use gopad_outline::{build_outline, OutlineNode};
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let path = match args.get(1) {
        Some(path) => Path::new(path),
        None => {
            eprintln!("usage: gopad <FILE|DIR>");
            return ExitCode::FAILURE;
        }
    };

    let ok = if path.is_dir() {
        print_outline(path)
    } else {
        print_highlights(path)
    };
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Parses one Go file and prints its layers, one span per line.
fn print_highlights(path: &Path) -> bool {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            log::error!("failed to read {}: {}", path.display(), err);
            return false;
        }
    };

    let mut highlighter = match Highlighter::new() {
        Ok(highlighter) => highlighter,
        Err(err) => {
            log::error!("failed to create highlighter: {}", err);
            return false;
        }
    };
    let store = match highlighter.parse(&source) {
        Ok(store) => store,
        Err(err) => {
            log::error!("failed to parse {}: {}", path.display(), err);
            return false;
        }
    };

    for (style, spans) in store.layers() {
        println!("{:?} ({} spans)", style, spans.len());
        for span in spans {
            println!("  {:>5}..{:<5} {:?}", span.start, span.end, &source[span.start..span.end]);
        }
    }
    true
}

/// Builds and prints the outline for a directory of Go files.
fn print_outline(path: &Path) -> bool {
    let outline = match build_outline(path) {
        Ok(outline) => outline,
        Err(err) => {
            log::error!("failed to build outline: {}", err);
            return false;
        }
    };

    if outline.packages().is_empty() {
        println!("no Go packages in {}", path.display());
        return true;
    }
    for pkg in outline.packages() {
        print_node(pkg, 0);
    }
    true
}

fn print_node(node: &OutlineNode, indent: usize) {
    let shown = node.display();
    println!("{:indent$}{} ({})", "", shown.name, shown.path, indent = indent * 2);
    for child in &shown.children {
        print_node(child, indent + 1);
    }
}
