//! The cst-filter command-line interface.
//!
//! Parses arguments, runs the library functions and renders the results.
//! Errors are printed as `miette` reports and turn into exit status 1.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use termcolor::StandardStream;
use walkdir::WalkDir;

use crate::collect::collect;
use crate::config::FilterConfig;
use crate::errors::{FilterError, FilterResult, SourceContext};
use crate::filter::{filter_traced, FilterTrace, KindSet, Rule};
use crate::render::{json_to_dot, render, to_terminal_text, Format};
use crate::syntax::sexpr::{parse_with_context, NodeKind, Sexpr, TokenKind};
use crate::syntax::Symbol;

pub mod args;
pub mod output;

pub use args::{ArgsCommand, FilterArgs};

/// Extension of source files picked up when filtering a directory.
const SOURCE_EXTENSION: &str = "sexp";

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// Parses process arguments and runs the requested command.
pub fn run() {
    let args = FilterArgs::parse();
    match execute(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            output::print_error(e);
            process::exit(1);
        }
    }
}

/// Runs one command. Returns `Ok(false)` when a batch finished with failures
/// that were already reported.
pub fn execute(args: FilterArgs) -> FilterResult<bool> {
    match args.command {
        ArgsCommand::Tree { file, format } => {
            let tree = parse_file(&file)?;
            print!("{}", with_newline(render(&tree, format)));
            Ok(true)
        }
        ArgsCommand::Filter {
            path,
            rules,
            format,
            trace,
            diff,
        } => {
            let rules: Vec<Rule<Sexpr>> =
                FilterConfig::<NodeKind, TokenKind>::from_path(&rules)?.into_rules();
            let options = FilterOptions {
                format,
                trace,
                diff,
            };
            handle_filter(&path, &rules, options)
        }
        ArgsCommand::Collect {
            file,
            nodes,
            tokens,
        } => {
            let tree = parse_file(&file)?;
            let kinds = KindSet::of(nodes, tokens);
            for symbol in collect(&tree, &kinds) {
                match symbol.text() {
                    Some(text) => println!("{}: {}", symbol.printable_name(), text),
                    None => println!("{}: {}", symbol.printable_name(), symbol.source_text()),
                }
            }
            Ok(true)
        }
        ArgsCommand::Json2dot { file } => {
            let text = read_file(&file)?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| FilterError::json_tree(format!("{}: {}", file.display(), e)))?;
            print!("{}", json_to_dot(&value)?);
            Ok(true)
        }
    }
}

// ============================================================================
// FILTER COMMAND
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct FilterOptions {
    format: Format,
    trace: bool,
    diff: bool,
}

fn handle_filter(path: &Path, rules: &[Rule<Sexpr>], options: FilterOptions) -> FilterResult<bool> {
    if !path.is_dir() {
        filter_file(path, rules, options)?;
        return Ok(true);
    }

    let files = discover_sources(path);
    tracing::info!(count = files.len(), dir = %path.display(), "filtering directory");
    let mut stdout = StandardStream::stdout(output::color_choice());
    let mut failures = 0;
    for file in files {
        let _ = output::write_header(&mut stdout, &file.display().to_string());
        if let Err(e) = filter_file(&file, rules, options) {
            failures += 1;
            output::print_error(e);
        }
    }
    Ok(failures == 0)
}

fn filter_file(file: &Path, rules: &[Rule<Sexpr>], options: FilterOptions) -> FilterResult<()> {
    let tree = parse_file(file)?;
    let mut trace = FilterTrace::new();
    let filtered = filter_traced(&tree, rules, &mut trace)?;

    print!("{}", with_newline(render(&filtered, options.format)));

    let mut stdout = StandardStream::stdout(output::color_choice());
    if options.trace {
        let _ = writeln!(stdout);
        let _ = trace.write_colored(&mut stdout);
    }
    if options.diff {
        let _ = writeln!(stdout);
        let before = to_terminal_text(&tree);
        let after = to_terminal_text(&filtered);
        let _ = output::write_diff(&mut stdout, &before, &after);
    }
    Ok(())
}

/// Source files under `dir`, sorted by path.
fn discover_sources(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION))
        .collect()
}

// ============================================================================
// HELPERS
// ============================================================================

fn read_file(path: &Path) -> FilterResult<String> {
    fs::read_to_string(path).map_err(|e| FilterError::io(path, e))
}

fn parse_file(path: &Path) -> FilterResult<Symbol<Sexpr>> {
    let text = read_file(path)?;
    let source = SourceContext::from_file(path.display().to_string(), text.clone());
    parse_with_context(&text, &source)
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_parse_into_commands() {
        let args = FilterArgs::try_parse_from([
            "cst-filter",
            "filter",
            "src.sexp",
            "--rules",
            "rules.yaml",
            "--format",
            "dot",
            "--trace",
        ])
        .unwrap();
        match args.command {
            ArgsCommand::Filter {
                path,
                rules,
                format,
                trace,
                diff,
            } => {
                assert_eq!(path, PathBuf::from("src.sexp"));
                assert_eq!(rules, PathBuf::from("rules.yaml"));
                assert_eq!(format, Format::Dot);
                assert!(trace);
                assert!(!diff);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn collect_kinds_use_kebab_case_names() {
        let args = FilterArgs::try_parse_from([
            "cst-filter",
            "collect",
            "src.sexp",
            "--node",
            "list",
            "--token",
            "l-paren",
        ])
        .unwrap();
        match args.command {
            ArgsCommand::Collect { nodes, tokens, .. } => {
                assert_eq!(nodes, vec![NodeKind::List]);
                assert_eq!(tokens, vec![TokenKind::LParen]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn with_newline_terminates_once() {
        assert_eq!(with_newline("a".into()), "a\n");
        assert_eq!(with_newline("a\n".into()), "a\n");
    }
}
