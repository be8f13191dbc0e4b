//! Command-line arguments and subcommands, declared with `clap` derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::render::Format;
use crate::syntax::sexpr::{NodeKind, TokenKind};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "cst-filter",
    version,
    about = "Derive focused views of concrete syntax trees with declarative rules."
)]
pub struct FilterArgs {
    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Parse a file and print its concrete syntax tree.
    Tree {
        /// The source file to parse.
        #[arg(required = true)]
        file: PathBuf,
        #[arg(long, short, value_enum, default_value_t = Format::Terminal)]
        format: Format,
    },
    /// Filter a file, or every `.sexp` file under a directory, with a rule set.
    Filter {
        /// A source file or a directory to search for `.sexp` files.
        #[arg(required = true)]
        path: PathBuf,
        /// Rule set in YAML, or JSON when the extension is `.json`.
        #[arg(long, short)]
        rules: PathBuf,
        #[arg(long, short, value_enum, default_value_t = Format::Terminal)]
        format: Format,
        /// Print every engine decision after the filtered tree.
        #[arg(long)]
        trace: bool,
        /// Print a line diff between the input and filtered trees.
        #[arg(long)]
        diff: bool,
    },
    /// List every symbol of the given kinds, without rebuilding a tree.
    Collect {
        /// The source file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// Node kind to collect; may be repeated.
        #[arg(long = "node", value_enum)]
        nodes: Vec<NodeKind>,
        /// Token kind to collect; may be repeated.
        #[arg(long = "token", value_enum)]
        tokens: Vec<TokenKind>,
    },
    /// Convert a JSON tree export into a DOT digraph.
    Json2dot {
        /// The JSON file to convert.
        #[arg(required = true)]
        file: PathBuf,
    },
}
